use crate::core::{NodeId, value::Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub target: NodeId,
    pub value: Value,
}

impl ValueChange {
    pub fn new(target: impl Into<NodeId>, value: Value) -> Self {
        Self {
            target: target.into(),
            value,
        }
    }
}

/// Actions emitted by widgets in `InteractionResult`.
/// These flow upward from widgets to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAction {
    ValueChanged { change: ValueChange },
    Focused { id: NodeId },
    Blurred { id: NodeId, value: Value },
    /// Widget signals it is done with its value.
    InputDone,
}
