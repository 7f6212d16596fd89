use crate::core::value::Value;
use crate::runtime::event::WidgetAction;
use crate::terminal::{CursorPos, KeyEvent, MouseEvent, TerminalSize};
use crate::ui::span::SpanLine;
use std::time::Instant;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    /// Node does not participate in focus cycling.
    None,
    /// A single focusable leaf.
    Leaf,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Controls how strictly a widget validates its current value.
///
/// - `Live`: called on every keystroke; partial input is acceptable.
/// - `Submit`: called when the user submits; the value must be complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Live,
    Submit,
}

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub focused_id: Option<String>,
    pub terminal_size: TerminalSize,
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

pub trait Drawable: Send {
    fn id(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            handled: true,
            request_render: false,
            actions: Vec::new(),
        }
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn input_done() -> Self {
        Self::with_action(WidgetAction::InputDone)
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.actions.extend(other.actions);
    }
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

pub trait Interactive: Send {
    fn focus_mode(&self) -> FocusMode;

    // --- input handling ---

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    /// Mouse events in widget-local coordinates.
    fn on_mouse(&mut self, _event: MouseEvent, _now: Instant) -> InteractionResult {
        InteractionResult::ignored()
    }
    fn on_focus_change(&mut self, _focused: bool) -> InteractionResult {
        InteractionResult::ignored()
    }
    fn on_tick(&mut self, _now: Instant) -> InteractionResult {
        InteractionResult::ignored()
    }
    fn cursor_pos(&self) -> Option<CursorPos> {
        None
    }

    // --- value ---

    fn value(&self) -> Option<Value> {
        None
    }
    fn set_value(&mut self, _value: Value) -> InteractionResult {
        InteractionResult::ignored()
    }

    // --- validation ---

    /// Validate the current value.
    ///
    /// `Live` mode is called on every keystroke; partial input is acceptable.
    /// `Submit` mode is called on submission; the value must be complete.
    fn validate(&self, _mode: ValidationMode) -> Result<(), String> {
        Ok(())
    }
}
