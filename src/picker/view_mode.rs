use crate::format::token::{FieldRole, has_role, tokenize};

/// Calendar granularity currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    Years,
    Months,
    Days,
    Time,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::Months => "months",
            Self::Days => "days",
            Self::Time => "time",
        }
    }
}

/// Finest granularity the formats describe, or `None` when no calendar can
/// be shown.
pub fn default_view_mode(date_format: Option<&str>, time_format: Option<&str>) -> Option<ViewMode> {
    if let Some(date_format) = date_format.filter(|format| !format.is_empty()) {
        let tokens = tokenize(date_format);
        if has_role(&tokens, FieldRole::Day) {
            return Some(ViewMode::Days);
        }
        if has_role(&tokens, FieldRole::Month) {
            return Some(ViewMode::Months);
        }
        if has_role(&tokens, FieldRole::Year) {
            return Some(ViewMode::Years);
        }
    }

    if time_format.is_some_and(|format| !format.is_empty()) {
        return Some(ViewMode::Time);
    }

    None
}

/// Drill-down step taken after a provisional pick. Time is never advanced.
pub fn next_view_mode(current: ViewMode) -> Option<ViewMode> {
    match current {
        ViewMode::Years => Some(ViewMode::Months),
        ViewMode::Months => Some(ViewMode::Days),
        ViewMode::Days => Some(ViewMode::Days),
        ViewMode::Time => None,
    }
}

/// Zoom-out step used by view headers.
pub fn parent_view_mode(current: ViewMode) -> ViewMode {
    match current {
        ViewMode::Years | ViewMode::Months => ViewMode::Years,
        ViewMode::Days => ViewMode::Months,
        ViewMode::Time => ViewMode::Days,
    }
}

#[cfg(test)]
mod tests {
    use super::{ViewMode, default_view_mode, next_view_mode};

    #[test]
    fn derives_finest_date_granularity_first() {
        assert_eq!(default_view_mode(Some("YYYY-MM-DD"), Some("HH:mm")), Some(ViewMode::Days));
        assert_eq!(default_view_mode(Some("YYYY-MM"), None), Some(ViewMode::Months));
        assert_eq!(default_view_mode(Some("YYYY"), None), Some(ViewMode::Years));
    }

    #[test]
    fn falls_back_to_time_then_nothing() {
        assert_eq!(default_view_mode(None, Some("HH:mm")), Some(ViewMode::Time));
        assert_eq!(default_view_mode(None, None), None);
        assert_eq!(default_view_mode(Some("[Week] w"), None), None);
    }

    #[test]
    fn drill_down_stops_at_days() {
        assert_eq!(next_view_mode(ViewMode::Years), Some(ViewMode::Months));
        assert_eq!(next_view_mode(ViewMode::Months), Some(ViewMode::Days));
        assert_eq!(next_view_mode(ViewMode::Days), Some(ViewMode::Days));
        assert_eq!(next_view_mode(ViewMode::Time), None);
    }
}
