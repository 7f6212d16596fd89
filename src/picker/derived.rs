/// A value derived from upstream inputs that local interaction may override
/// until the derivation changes.
///
/// `get` returns the override when present, the derived value otherwise.
/// Feeding a different derived value through [`Derived::rederive`] drops the
/// override.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived<T> {
    derived: T,
    overridden: Option<T>,
}

impl<T: Clone + PartialEq> Derived<T> {
    pub fn new(derived: T) -> Self {
        Self {
            derived,
            overridden: None,
        }
    }

    pub fn get(&self) -> &T {
        self.overridden.as_ref().unwrap_or(&self.derived)
    }

    pub fn set(&mut self, value: T) {
        self.overridden = Some(value);
    }

    pub fn is_overridden(&self) -> bool {
        self.overridden.is_some()
    }

    /// Returns `true` when the derivation changed and the override was dropped.
    pub fn rederive(&mut self, derived: T) -> bool {
        if self.derived == derived {
            return false;
        }
        self.derived = derived;
        self.overridden = None;
        true
    }

    pub fn reset(&mut self) {
        self.overridden = None;
    }
}

#[cfg(test)]
mod tests {
    use super::Derived;

    #[test]
    fn override_survives_same_derivation() {
        let mut state = Derived::new(1);
        state.set(5);
        assert!(!state.rederive(1));
        assert_eq!(*state.get(), 5);
    }

    #[test]
    fn override_drops_when_derivation_changes() {
        let mut state = Derived::new(1);
        state.set(5);
        assert!(state.rederive(2));
        assert_eq!(*state.get(), 2);
        assert!(!state.is_overridden());
    }
}
