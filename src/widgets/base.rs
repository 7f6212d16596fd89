use crate::core::NodeId;

#[derive(Debug, Clone)]
pub struct InputBase {
    id: NodeId,
    label: String,
}

impl InputBase {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn node_id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn focus_marker(&self, focused: bool) -> &'static str {
        if focused { ">" } else { " " }
    }

    pub fn prefixed_label(&self, focused: bool) -> String {
        format!("{} {}", self.focus_marker(focused), self.label)
    }
}
