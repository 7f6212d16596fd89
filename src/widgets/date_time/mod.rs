mod render;

use crate::core::calendar::CalendarValue;
use crate::core::value::Value;
use crate::format::FormatSpec;
use crate::picker::{
    DateTimePicker, DateTypeMode, PickerEvent, PickerKey, PickerOutcome, Press, StepDirection,
    ViewMode,
};
use crate::runtime::event::{ValueChange, WidgetAction};
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use crate::views::CalendarView;
use crate::widgets::base::InputBase;
use crate::widgets::text_edit;
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext, ValidationMode,
};
use crate::widgets::validators::{Validator, run_validators};
use render::HitTarget;
use std::time::{Duration, Instant};

const INVALID_DATE: &str = "Invalid or incomplete date";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Highlight {
    mode: ViewMode,
    page: CalendarValue,
    row: usize,
    col: usize,
}

// ── DateTimeInput ─────────────────────────────────────────────────────────────

/// Text field with a drop-down calendar.
///
/// The text buffer is kept as typed until the picker's value changes, at
/// which point it is replaced by the picker's rendering of the new value.
pub struct DateTimeInput {
    base: InputBase,
    picker: DateTimePicker,
    text: String,
    cursor: usize,
    synced_value: Value,
    highlight: Option<Highlight>,
    validators: Vec<Validator>,
}

impl DateTimeInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>, picker: DateTimePicker) -> Self {
        let text = picker.input_text();
        let cursor = text_edit::char_count(&text);
        let synced_value = picker.value().clone();
        Self {
            base: InputBase::new(id.into(), label),
            picker,
            text,
            cursor,
            synced_value,
            highlight: None,
            validators: Vec::new(),
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn picker(&self) -> &DateTimePicker {
        &self.picker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn configure(&mut self, formats: FormatSpec, mode: Option<DateTypeMode>) -> InteractionResult {
        let outcome = self.picker.configure(formats, mode);
        self.apply(outcome)
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.picker.poll_timeout(now, default_timeout)
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn apply(&mut self, outcome: PickerOutcome) -> InteractionResult {
        self.sync_text();
        let mut result = if outcome.handled {
            InteractionResult::handled()
        } else {
            InteractionResult::ignored()
        };
        for event in outcome.events {
            let id = self.base.node_id().clone();
            result.actions.push(match event {
                PickerEvent::Changed(value) => WidgetAction::ValueChanged {
                    change: ValueChange::new(id, value),
                },
                PickerEvent::Focused => WidgetAction::Focused { id },
                PickerEvent::Blurred(value) => WidgetAction::Blurred { id, value },
            });
            result.request_render = true;
        }
        result
    }

    fn sync_text(&mut self) {
        if self.picker.value() == &self.synced_value {
            return;
        }
        self.synced_value = self.picker.value().clone();
        // Echo of the buffer being edited; the cursor stays where the user left it.
        if matches!(&self.synced_value, Value::Text(text) if *text == self.text) {
            return;
        }
        let text = self.picker.input_text();
        if text == self.text {
            return;
        }
        self.text = text;
        self.cursor = text_edit::char_count(&self.text);
    }

    fn edit(&mut self, op: impl FnOnce(&mut String, &mut usize) -> bool) -> InteractionResult {
        if self.picker.is_static() {
            return InteractionResult::ignored();
        }
        if !op(&mut self.text, &mut self.cursor) {
            return InteractionResult::consumed();
        }
        let text = self.text.clone();
        let outcome = self.picker.on_input_change(&text);
        let mut result = self.apply(outcome);
        result.handled = true;
        result.request_render = true;
        result
    }

    fn move_cursor(&mut self, moved: bool) -> InteractionResult {
        if moved {
            InteractionResult::handled()
        } else {
            InteractionResult::consumed()
        }
    }

    fn highlight_position(&self, view: &CalendarView) -> (usize, usize) {
        let (rows, cols) = view_dimensions(view);
        match self.highlight {
            Some(h)
                if h.mode == view.mode()
                    && h.page == self.picker.view_date()
                    && h.row < rows
                    && h.col < cols =>
            {
                (h.row, h.col)
            }
            _ => default_position(view),
        }
    }

    fn move_highlight(&mut self, d_row: isize, d_col: isize) -> InteractionResult {
        let Some(view) = self.picker.calendar_view() else {
            return InteractionResult::ignored();
        };
        let (rows, cols) = view_dimensions(&view);
        if rows == 0 || cols == 0 {
            return InteractionResult::ignored();
        }
        let (row, col) = self.highlight_position(&view);
        self.highlight = Some(Highlight {
            mode: view.mode(),
            page: self.picker.view_date(),
            row: row.saturating_add_signed(d_row).min(rows - 1),
            col: col.saturating_add_signed(d_col).min(cols - 1),
        });
        InteractionResult::handled()
    }

    fn activate_highlight(&mut self, now: Instant) -> InteractionResult {
        let Some(view) = self.picker.calendar_view() else {
            return InteractionResult::ignored();
        };
        let (row, col) = self.highlight_position(&view);
        match &view {
            CalendarView::Time(panel) => match panel.counters.get(col) {
                Some(counter) => {
                    let direction = if row == 0 {
                        StepDirection::Up
                    } else {
                        StepDirection::Down
                    };
                    let mut outcome = self.picker.press_stepper(Press::new(direction, counter.unit), now);
                    outcome.merge(self.picker.release_stepper(now));
                    self.apply(outcome)
                }
                None if panel.day_part.is_some() => {
                    let outcome = self.picker.toggle_day_part();
                    self.apply(outcome)
                }
                None => InteractionResult::ignored(),
            },
            _ => match view.grid().and_then(|grid| grid.cell(row, col)).cloned() {
                Some(cell) => {
                    let outcome = self.picker.pick_cell(&cell);
                    self.apply(outcome)
                }
                None => InteractionResult::ignored(),
            },
        }
    }

    fn press_target(&mut self, target: Option<HitTarget>, now: Instant) -> InteractionResult {
        let outcome = match target {
            Some(HitTarget::TextField) => self.picker.open(),
            Some(HitTarget::Previous) => self.picker.page(false),
            Some(HitTarget::Next) => self.picker.page(true),
            Some(HitTarget::Header) => self.picker.zoom_out(),
            Some(HitTarget::Footer) => self.picker.show_time(),
            Some(HitTarget::Stepper(press)) => self.picker.press_stepper(press, now),
            Some(HitTarget::DayPart) => self.picker.toggle_day_part(),
            Some(HitTarget::Cell { row, col }) => {
                let Some(view) = self.picker.calendar_view() else {
                    return InteractionResult::ignored();
                };
                let Some(cell) = view.grid().and_then(|grid| grid.cell(row, col)).cloned() else {
                    return InteractionResult::ignored();
                };
                self.highlight = Some(Highlight {
                    mode: view.mode(),
                    page: self.picker.view_date(),
                    row,
                    col,
                });
                self.picker.pick_cell(&cell)
            }
            None => self.picker.click_outside(),
        };
        self.apply(outcome)
    }
}

fn view_dimensions(view: &CalendarView) -> (usize, usize) {
    match view {
        CalendarView::Time(panel) => (2, panel.counters.len() + usize::from(panel.day_part.is_some())),
        _ => view
            .grid()
            .map(|grid| (grid.row_count(), grid.column_count()))
            .unwrap_or((0, 0)),
    }
}

fn default_position(view: &CalendarView) -> (usize, usize) {
    let Some(grid) = view.grid() else {
        return (0, 0);
    };
    let on_page = |cell: &crate::views::Cell| !cell.flags.old && !cell.flags.new;
    grid.position_of(|cell| cell.flags.active && on_page(cell))
        .or_else(|| grid.position_of(|cell| cell.flags.today && on_page(cell)))
        .or_else(|| grid.position_of(on_page))
        .unwrap_or((0, 0))
}

// ── Drawable ──────────────────────────────────────────────────────────────────

impl Drawable for DateTimeInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = ctx.focused_id.as_deref() == Some(self.base.id());
        DrawOutput {
            lines: self.frame(focused).lines,
        }
    }
}

// ── Interactive ───────────────────────────────────────────────────────────────

impl Interactive for DateTimeInput {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let visible = self.picker.is_calendar_visible();

        match key.code {
            KeyCode::Enter if self.picker.is_open() => {
                let outcome = self.picker.on_key(PickerKey::Enter);
                self.apply(outcome)
            }
            KeyCode::Enter => InteractionResult::input_done(),
            KeyCode::Esc => {
                let outcome = self.picker.on_key(PickerKey::Escape);
                self.apply(outcome)
            }
            KeyCode::Tab | KeyCode::BackTab => {
                let outcome = self.picker.on_key(PickerKey::Tab);
                let mut result = self.apply(outcome);
                result.handled = false;
                result
            }
            KeyCode::Char(' ') if ctrl && visible => self.activate_highlight(Instant::now()),
            KeyCode::Up if ctrl && visible => {
                let outcome = self.picker.zoom_out();
                self.apply(outcome)
            }
            KeyCode::Down if ctrl && visible => {
                let outcome = self.picker.show_time();
                self.apply(outcome)
            }
            KeyCode::Up if visible => self.move_highlight(-1, 0),
            KeyCode::Down if visible => self.move_highlight(1, 0),
            KeyCode::Down => {
                let outcome = self.picker.on_key(PickerKey::ArrowDown);
                self.apply(outcome)
            }
            KeyCode::Left if shift && visible => self.move_highlight(0, -1),
            KeyCode::Right if shift && visible => self.move_highlight(0, 1),
            KeyCode::PageUp if visible => {
                let outcome = self.picker.page(false);
                self.apply(outcome)
            }
            KeyCode::PageDown if visible => {
                let outcome = self.picker.page(true);
                self.apply(outcome)
            }
            KeyCode::Left => {
                let moved = text_edit::move_left(&mut self.cursor, &self.text);
                self.move_cursor(moved)
            }
            KeyCode::Right => {
                let moved = text_edit::move_right(&mut self.cursor, &self.text);
                self.move_cursor(moved)
            }
            KeyCode::Home => {
                let moved = self.cursor != 0;
                self.cursor = 0;
                self.move_cursor(moved)
            }
            KeyCode::End => {
                let end = text_edit::char_count(&self.text);
                let moved = self.cursor != end;
                self.cursor = end;
                self.move_cursor(moved)
            }
            KeyCode::Backspace if ctrl || alt => self.edit(text_edit::delete_segment_left),
            KeyCode::Char('w') if ctrl => self.edit(text_edit::delete_segment_left),
            KeyCode::Backspace => self.edit(text_edit::backspace_char),
            KeyCode::Delete => self.edit(text_edit::delete_char),
            KeyCode::Char(ch) if !ctrl && !alt => self.edit(|text, cursor| {
                text_edit::insert_char(text, cursor, ch);
                true
            }),
            _ => InteractionResult::ignored(),
        }
    }

    fn on_mouse(&mut self, event: MouseEvent, now: Instant) -> InteractionResult {
        match event.kind {
            MouseEventKind::Down => {
                let target = self.frame(true).hit(event.col, event.row);
                self.press_target(target, now)
            }
            MouseEventKind::Up => {
                let outcome = self.picker.release_stepper(now);
                self.apply(outcome)
            }
        }
    }

    fn on_focus_change(&mut self, focused: bool) -> InteractionResult {
        let outcome = if focused {
            self.picker.open()
        } else {
            self.picker.click_outside()
        };
        self.apply(outcome)
    }

    fn on_tick(&mut self, now: Instant) -> InteractionResult {
        let outcome = self.picker.on_tick(now);
        self.apply(outcome)
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.frame(true).cursor
    }

    fn value(&self) -> Option<Value> {
        match self.picker.value() {
            Value::None => None,
            value => Some(value.clone()),
        }
    }

    fn set_value(&mut self, value: Value) -> InteractionResult {
        let outcome = self.picker.set_value(value);
        self.apply(outcome)
    }

    fn validate(&self, mode: ValidationMode) -> Result<(), String> {
        if mode == ValidationMode::Live {
            return Ok(());
        }
        if !self.text.trim().is_empty() && self.picker.selected_date().is_none() {
            return Err(INVALID_DATE.to_string());
        }
        run_validators(&self.validators, &self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::DateTimeInput;
    use crate::core::calendar::CalendarValue;
    use crate::core::value::Value;
    use crate::format::{FormatSpec, fmt};
    use crate::picker::{DateTimePicker, ViewMode};
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
    use crate::widgets::traits::{Interactive, InteractionResult, ValidationMode};
    use crate::widgets::validators::required;
    use chrono::NaiveDate;
    use std::time::Instant;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> CalendarValue {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid datetime")
    }

    fn input(formats: FormatSpec) -> DateTimeInput {
        let picker = DateTimePicker::new(formats)
            .with_today(NaiveDate::from_ymd_opt(2015, 6, 20).expect("date"));
        DateTimeInput::new("due", "Due", picker)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn type_text(input: &mut DateTimeInput, text: &str) -> Vec<WidgetAction> {
        text.chars()
            .flat_map(|ch| input.on_key(key(KeyCode::Char(ch))).actions)
            .collect()
    }

    fn changes(actions: &[WidgetAction]) -> Vec<Value> {
        actions
            .iter()
            .filter_map(|action| match action {
                WidgetAction::ValueChanged { change } => Some(change.value.clone()),
                _ => None,
            })
            .collect()
    }

    fn has_blur(result: &InteractionResult) -> bool {
        result
            .actions
            .iter()
            .any(|action| matches!(action, WidgetAction::Blurred { .. }))
    }

    #[test]
    fn typing_emits_live_changes_and_keeps_calendar_open() {
        let mut input = input(FormatSpec::new(fmt::DATE_MDY, false));
        let focus = input.on_focus_change(true);
        assert!(matches!(focus.actions.as_slice(), [WidgetAction::Focused { id }] if id.as_str() == "due"));

        let actions = type_text(&mut input, "06/16/2015");
        let values = changes(&actions);
        assert_eq!(values.len(), 10);
        assert_eq!(values.last(), Some(&Value::DateTime(at(2015, 6, 16, 0, 0))));
        assert_eq!(input.text(), "06/16/2015");
        assert!(input.picker().is_open());
    }

    #[test]
    fn editing_mid_text_keeps_cursor_in_place() {
        let picker = DateTimePicker::new(FormatSpec::new(fmt::DATE_MDY, false))
            .with_today(NaiveDate::from_ymd_opt(2015, 6, 20).expect("date"))
            .with_value("06/16/2015");
        let mut input = DateTimeInput::new("due", "Due", picker);
        input.on_focus_change(true);

        input.on_key(key(KeyCode::Home));
        input.on_key(key(KeyCode::Right));
        input.on_key(key(KeyCode::Right));
        let partial = input.on_key(key(KeyCode::Backspace));
        assert_eq!(changes(&partial.actions), vec![Value::Text("0/16/2015".to_string())]);
        assert_eq!(input.text(), "0/16/2015");
        assert_eq!(input.cursor, 1);

        let actions = type_text(&mut input, "7");
        assert_eq!(changes(&actions), vec![Value::DateTime(at(2015, 7, 16, 0, 0))]);
        assert_eq!(input.text(), "07/16/2015");
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn arrow_down_opens_and_escape_closes() {
        let mut input = input(FormatSpec::new(fmt::DATE_MDY, false));
        assert!(input.on_key(key(KeyCode::Down)).handled);
        assert!(input.picker().is_open());
        let closed = input.on_key(key(KeyCode::Esc));
        assert!(has_blur(&closed));
        assert!(!input.picker().is_open());
        assert!(!input.on_key(key(KeyCode::Esc)).handled);
    }

    #[test]
    fn enter_closes_when_open_and_submits_when_closed() {
        let mut input = input(FormatSpec::new(fmt::DATE_MDY, false));
        input.on_focus_change(true);
        let closed = input.on_key(key(KeyCode::Enter));
        assert!(closed.handled && has_blur(&closed));

        let submitted = input.on_key(key(KeyCode::Enter));
        assert!(matches!(submitted.actions.as_slice(), [WidgetAction::InputDone]));
    }

    #[test]
    fn tab_closes_without_consuming() {
        let mut input = input(FormatSpec::new(fmt::DATE_MDY, false));
        input.on_focus_change(true);
        let result = input.on_key(key(KeyCode::Tab));
        assert!(!result.handled);
        assert!(has_blur(&result));
    }

    #[test]
    fn keyboard_grid_navigation_picks_highlighted_day() {
        let mut input = input(FormatSpec::new(fmt::DATE_MDY, false));
        input.on_focus_change(true);

        input.on_key(key(KeyCode::Down));
        input.on_key(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT));
        let picked = input.on_key(ctrl(KeyCode::Char(' ')));

        assert_eq!(changes(&picked.actions), vec![Value::DateTime(at(2015, 6, 26, 0, 0))]);
        assert!(has_blur(&picked));
        assert_eq!(input.text(), "06/26/2015");
    }

    #[test]
    fn zoom_out_then_drill_back_down() {
        let mut input = input(FormatSpec::new(fmt::DATE_MDY, false));
        input.on_focus_change(true);
        input.on_key(ctrl(KeyCode::Up));
        assert_eq!(input.picker().view_mode(), Some(ViewMode::Months));

        let drilled = input.on_key(ctrl(KeyCode::Char(' ')));
        assert!(changes(&drilled.actions).is_empty());
        assert_eq!(input.picker().view_mode(), Some(ViewMode::Days));
    }

    #[test]
    fn mouse_click_on_cell_and_outside() {
        let mut input = input(FormatSpec::new(fmt::DATE_MDY, false));
        input.on_focus_change(true);

        let lines = input.frame(true).lines;
        let (row, col) = lines
            .iter()
            .map(|line| crate::ui::span::line_text(line))
            .enumerate()
            .find_map(|(row, text)| text.find(" 16 ").map(|byte| (row, text[..byte].chars().count() + 1)))
            .expect("cell labelled 16");

        let picked = input.on_mouse(
            MouseEvent {
                kind: MouseEventKind::Down,
                col: col as u16,
                row: row as u16,
            },
            Instant::now(),
        );
        assert_eq!(changes(&picked.actions), vec![Value::DateTime(at(2015, 6, 16, 0, 0))]);

        input.on_focus_change(true);
        let outside = input.on_mouse(
            MouseEvent {
                kind: MouseEventKind::Down,
                col: 70,
                row: 40,
            },
            Instant::now(),
        );
        assert!(has_blur(&outside));
    }

    #[test]
    fn submit_validation_rejects_partial_text() {
        let mut input = input(FormatSpec::new(fmt::DATE_MDY, false)).with_validator(required("Date is required"));
        assert_eq!(
            input.validate(ValidationMode::Submit),
            Err("Date is required".to_string())
        );
        type_text(&mut input, "06/1");
        assert!(input.validate(ValidationMode::Live).is_ok());
        assert_eq!(
            input.validate(ValidationMode::Submit),
            Err("Invalid or incomplete date".to_string())
        );
        type_text(&mut input, "6/2015");
        assert!(input.validate(ValidationMode::Submit).is_ok());
    }

    #[test]
    fn host_value_replaces_text() {
        let mut input = input(FormatSpec::new(fmt::DATE_MDY, false));
        type_text(&mut input, "01/0");
        input.set_value(Value::Number(1_434_412_800_000));
        assert_eq!(input.text(), "06/16/2015");
        assert_eq!(input.value(), Some(Value::Number(1_434_412_800_000)));
    }

    #[test]
    fn time_view_stepper_via_keyboard() {
        let picker = DateTimePicker::new(FormatSpec::new(false, fmt::TIME_HM))
            .with_today(NaiveDate::from_ymd_opt(2015, 6, 20).expect("date"))
            .with_value("09:50");
        let mut input = DateTimeInput::new("at", "At", picker);
        input.on_focus_change(true);
        input.on_key(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
        let stepped = input.on_key(ctrl(KeyCode::Char(' ')));
        assert_eq!(changes(&stepped.actions), vec![Value::DateTime(at(2015, 6, 20, 9, 51))]);
        assert_eq!(input.text(), "09:51");
        assert!(input.picker().is_open());
    }
}
