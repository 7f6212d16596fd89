use super::coordinator::ChangeCoordinator;
use super::date_type::DateTypeMode;
use super::derived::Derived;
use super::stepper::{Press, Stepper};
use super::time_constraints::TimeConstraints;
use super::view_mode::{ViewMode, default_view_mode, next_view_mode, parent_view_mode};
use crate::core::calendar::{self, CalendarValue, Unit};
use crate::core::value::Value;
use crate::format::{FormatSpec, Locale, Normalizer};
use crate::views::{CalendarView, Cell, ViewContext};
use chrono::{NaiveDate, Timelike};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub type DatePredicate = Box<dyn Fn(&CalendarValue) -> bool + Send + Sync>;

/// Notifications produced by one interaction, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    Changed(Value),
    Focused,
    Blurred(Value),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickerOutcome {
    pub handled: bool,
    /// The triggering key must not fall through to form submission.
    pub prevent_default: bool,
    pub events: Vec<PickerEvent>,
}

impl PickerOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.prevent_default |= other.prevent_default;
        self.events.extend(other.events);
    }

    pub fn changes(&self) -> impl Iterator<Item = &Value> {
        self.events.iter().filter_map(|event| match event {
            PickerEvent::Changed(value) => Some(value),
            _ => None,
        })
    }

    pub fn blurred(&self) -> Option<&Value> {
        self.events.iter().find_map(|event| match event {
            PickerEvent::Blurred(value) => Some(value),
            _ => None,
        })
    }

    pub fn focused(&self) -> bool {
        self.events.contains(&PickerEvent::Focused)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKey {
    Enter,
    Escape,
    Tab,
    ArrowDown,
}

/// Selection driver for one date/time picker instance.
///
/// Owns the external value, the transient view state (view date, view
/// timestamp, view mode) and the open flag. Every interaction returns a
/// [`PickerOutcome`] carrying at most one change notification.
///
/// Unless built with [`DateTimePicker::controlled`], emitted changes are
/// applied to the picker's own value. A controlled picker only changes its
/// value through [`DateTimePicker::set_value`].
pub struct DateTimePicker {
    formats: FormatSpec,
    full_format: String,
    default_view_mode: Option<ViewMode>,
    explicit_date_type: Option<DateTypeMode>,
    locale: Locale,
    today: NaiveDate,
    value: Value,
    value_as_date: Option<CalendarValue>,
    view_mode: Derived<Option<ViewMode>>,
    view_date: Derived<CalendarValue>,
    view_timestamp: Derived<CalendarValue>,
    is_open: bool,
    is_static: bool,
    controlled: bool,
    is_valid_date: Option<DatePredicate>,
    time_constraints: TimeConstraints,
    stepper: Stepper,
}

impl DateTimePicker {
    pub fn new(formats: FormatSpec) -> Self {
        let today = calendar::today();
        let full_format = formats.full_format();
        let default_view_mode = default_view_mode(formats.date_format(), formats.time_format());
        let start = calendar::start_of_day(today);
        let mut picker = Self {
            formats,
            full_format,
            default_view_mode,
            explicit_date_type: None,
            locale: Locale::default(),
            today,
            value: Value::None,
            value_as_date: None,
            view_mode: Derived::new(default_view_mode),
            view_date: Derived::new(start),
            view_timestamp: Derived::new(start),
            is_open: false,
            is_static: false,
            controlled: false,
            is_valid_date: None,
            time_constraints: TimeConstraints::default(),
            stepper: Stepper::new(),
        };
        picker.refresh_derived();
        picker
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self.refresh_derived();
        self
    }

    pub fn with_date_type_mode(mut self, mode: DateTypeMode) -> Self {
        self.explicit_date_type = Some(mode);
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self.refresh_derived();
        self
    }

    /// Pins the date used for "today" highlighting and for formats that
    /// carry no date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self.refresh_derived();
        self
    }

    pub fn with_valid_date<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CalendarValue) -> bool + Send + Sync + 'static,
    {
        self.is_valid_date = Some(Box::new(predicate));
        self
    }

    pub fn with_time_constraints(mut self, constraints: TimeConstraints) -> Self {
        self.time_constraints = constraints;
        self
    }

    /// Static pickers show the calendar permanently and never open or close.
    pub fn static_mode(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn controlled(mut self, controlled: bool) -> Self {
        self.controlled = controlled;
        self
    }

    // --- accessors ---

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn selected_date(&self) -> Option<CalendarValue> {
        self.value_as_date
    }

    pub fn view_date(&self) -> CalendarValue {
        *self.view_date.get()
    }

    pub fn view_timestamp(&self) -> CalendarValue {
        *self.view_timestamp.get()
    }

    pub fn view_mode(&self) -> Option<ViewMode> {
        *self.view_mode.get()
    }

    pub fn default_view_mode(&self) -> Option<ViewMode> {
        self.default_view_mode
    }

    pub fn formats(&self) -> &FormatSpec {
        &self.formats
    }

    pub fn date_format(&self) -> Option<&str> {
        self.formats.date_format()
    }

    pub fn time_format(&self) -> Option<&str> {
        self.formats.time_format()
    }

    pub fn full_format(&self) -> &str {
        &self.full_format
    }

    pub fn date_type_mode(&self) -> DateTypeMode {
        DateTypeMode::resolve(self.explicit_date_type, &self.value)
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn time_constraints(&self) -> &TimeConstraints {
        &self.time_constraints
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_calendar_visible(&self) -> bool {
        (self.is_static || self.is_open) && self.view_mode().is_some()
    }

    pub fn is_valid_date(&self, value: &CalendarValue) -> bool {
        self.is_valid_date
            .as_ref()
            .is_none_or(|predicate| predicate(value))
    }

    pub fn active_press(&self) -> Option<Press> {
        self.stepper.active()
    }

    /// Text shown in the input field: the formatted value when it parses,
    /// the raw text otherwise.
    pub fn input_text(&self) -> String {
        match self.value_as_date {
            Some(value) if !self.full_format.is_empty() => {
                self.normalizer().format(value, &self.full_format)
            }
            _ => self.value.as_text().unwrap_or_default().to_string(),
        }
    }

    pub fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(&self.locale, self.today)
    }

    pub fn view_context(&self) -> ViewContext<'_> {
        ViewContext {
            view_date: self.view_date(),
            view_timestamp: self.view_timestamp(),
            selected: self.value_as_date,
            today: self.today,
            locale: &self.locale,
            date_format: self.formats.date_format(),
            time_format: self.formats.time_format(),
            is_valid_date: self.is_valid_date.as_deref(),
        }
    }

    pub fn calendar_view(&self) -> Option<CalendarView> {
        let mode = self.view_mode()?;
        Some(CalendarView::build(mode, &self.view_context()))
    }

    // --- open / close ---

    pub fn open(&mut self) -> PickerOutcome {
        if self.is_static || self.is_open || self.view_mode().is_none() {
            return PickerOutcome::ignored();
        }
        self.is_open = true;
        debug!(view_mode = ?self.view_mode(), "picker opened");
        PickerOutcome {
            handled: true,
            prevent_default: false,
            events: vec![PickerEvent::Focused],
        }
    }

    pub fn close(&mut self) -> PickerOutcome {
        let current = Value::from(self.value_as_date);
        self.close_with(current)
    }

    fn close_with(&mut self, selected: Value) -> PickerOutcome {
        if !self.is_open {
            return PickerOutcome::ignored();
        }
        self.is_open = false;
        self.stepper.cancel(Instant::now());
        self.reset_transient();
        let blurred = self.coordinator().compute_output_value(&selected);
        debug!(value = ?blurred, "picker closed");
        PickerOutcome {
            handled: true,
            prevent_default: false,
            events: vec![PickerEvent::Blurred(blurred)],
        }
    }

    pub fn on_key(&mut self, key: PickerKey) -> PickerOutcome {
        match (self.is_open, key) {
            (true, PickerKey::Enter) => {
                let mut outcome = self.close();
                outcome.handled = true;
                outcome.prevent_default = true;
                outcome
            }
            (true, PickerKey::Escape | PickerKey::Tab) => self.close(),
            (false, PickerKey::ArrowDown) => self.open(),
            _ => PickerOutcome::ignored(),
        }
    }

    pub fn click_outside(&mut self) -> PickerOutcome {
        if self.is_open {
            self.close()
        } else {
            PickerOutcome::ignored()
        }
    }

    // --- selection ---

    /// Commits or drills into `value`, depending on the current view mode.
    pub fn set_selected_date(&mut self, value: CalendarValue, try_close: bool) -> PickerOutcome {
        self.view_date.set(value);
        self.view_timestamp.set(value);

        let mut outcome = PickerOutcome::handled();
        match self.view_mode() {
            Some(ViewMode::Time) => self.emit_change(Value::DateTime(value), &mut outcome),
            mode if mode == self.default_view_mode => {
                self.emit_change(Value::DateTime(value), &mut outcome);
                if try_close {
                    outcome.merge(self.close_with(Value::DateTime(value)));
                }
            }
            Some(current) => {
                if let Some(next) = next_view_mode(current) {
                    self.set_view_mode(next);
                }
            }
            None => {}
        }
        outcome
    }

    /// Picks a rendered cell. Disabled cells are inert.
    pub fn pick_cell(&mut self, cell: &Cell) -> PickerOutcome {
        if cell.flags.disabled {
            return PickerOutcome::ignored();
        }
        self.set_selected_date(cell.value, true)
    }

    /// Live edit of the input text.
    pub fn on_input_change(&mut self, text: &str) -> PickerOutcome {
        match self.normalizer().parse_text(text, &self.full_format) {
            Some(parsed) => self.set_selected_date(parsed, false),
            None => {
                let mut outcome = PickerOutcome::handled();
                self.emit_change(Value::Text(text.to_string()), &mut outcome);
                outcome
            }
        }
    }

    fn emit_change(&mut self, new_value: Value, outcome: &mut PickerOutcome) {
        let coordinator = self.coordinator();
        let computed = coordinator.compute_output_value(&new_value);
        if coordinator.is_redundant(&self.value, &computed) {
            debug!(value = ?computed, "change suppressed");
            return;
        }
        debug!(value = ?computed, "value changed");
        outcome.events.push(PickerEvent::Changed(computed.clone()));
        if !self.controlled {
            self.apply_value(computed);
        }
    }

    // --- navigation ---

    pub fn set_view_date(&mut self, value: CalendarValue) {
        self.view_date.set(value);
        self.refresh_timestamp();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        debug!(view_mode = mode.as_str(), "view mode changed");
        self.view_mode.set(Some(mode));
    }

    /// Moves the view one page: a month in days, a year in months, a decade
    /// in years.
    pub fn page(&mut self, forward: bool) -> PickerOutcome {
        let (amount, unit) = match self.view_mode() {
            Some(ViewMode::Days) => (1, Unit::Month),
            Some(ViewMode::Months) => (1, Unit::Year),
            Some(ViewMode::Years) => (10, Unit::Year),
            Some(ViewMode::Time) | None => return PickerOutcome::ignored(),
        };
        let amount = if forward { amount } else { -amount };
        self.set_view_date(calendar::add_unit(self.view_date(), amount, unit));
        PickerOutcome::handled()
    }

    /// Header action of the current view.
    pub fn zoom_out(&mut self) -> PickerOutcome {
        match self.view_mode() {
            Some(ViewMode::Time) if self.date_format().is_none() => PickerOutcome::ignored(),
            Some(mode) => {
                self.set_view_mode(parent_view_mode(mode));
                PickerOutcome::handled()
            }
            None => PickerOutcome::ignored(),
        }
    }

    /// Footer action of the days view.
    pub fn show_time(&mut self) -> PickerOutcome {
        if self.view_mode() != Some(ViewMode::Days) || self.time_format().is_none() {
            return PickerOutcome::ignored();
        }
        self.set_view_mode(ViewMode::Time);
        PickerOutcome::handled()
    }

    // --- time steppers ---

    pub fn press_stepper(&mut self, press: Press, now: Instant) -> PickerOutcome {
        if self.view_mode() != Some(ViewMode::Time) {
            return PickerOutcome::ignored();
        }
        self.step_timestamp(press);
        self.stepper.press(press, now);
        PickerOutcome::handled()
    }

    pub fn on_tick(&mut self, now: Instant) -> PickerOutcome {
        let steps = self.stepper.tick(now);
        let Some(press) = self.stepper.active() else {
            return PickerOutcome::ignored();
        };
        if steps == 0 {
            return PickerOutcome::ignored();
        }
        for _ in 0..steps {
            self.step_timestamp(press);
        }
        PickerOutcome::handled()
    }

    pub fn release_stepper(&mut self, now: Instant) -> PickerOutcome {
        match self.stepper.release(now) {
            Some(_) => self.set_selected_date(self.view_timestamp(), true),
            None => PickerOutcome::ignored(),
        }
    }

    pub fn toggle_day_part(&mut self) -> PickerOutcome {
        if self.view_mode() != Some(ViewMode::Time) {
            return PickerOutcome::ignored();
        }
        let timestamp = self.view_timestamp();
        let shift = if timestamp.hour() >= 12 { -12 } else { 12 };
        self.set_selected_date(calendar::add_unit(timestamp, shift, Unit::Hour), true)
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.stepper.poll_timeout(now, default_timeout)
    }

    pub fn teardown(&mut self) {
        self.stepper.cancel(Instant::now());
    }

    // --- host updates ---

    /// Value pushed by the host. Without an explicit date type mode the
    /// output follows the new value, so switching between numeric and
    /// other values replays the selection in the other representation.
    pub fn set_value(&mut self, value: impl Into<Value>) -> PickerOutcome {
        let before = self.date_type_mode();
        self.apply_value(value.into());
        if self.date_type_mode() != before {
            return self.replay();
        }
        PickerOutcome::ignored()
    }

    pub fn set_formats(&mut self, formats: FormatSpec) -> PickerOutcome {
        self.configure(formats, self.explicit_date_type)
    }

    pub fn set_date_type_mode(&mut self, mode: Option<DateTypeMode>) -> PickerOutcome {
        self.configure(self.formats.clone(), mode)
    }

    /// Applies new formats and output mode, then replays the current value
    /// as a selection so the host sees it in the new representation.
    pub fn configure(&mut self, formats: FormatSpec, mode: Option<DateTypeMode>) -> PickerOutcome {
        if formats == self.formats && mode == self.explicit_date_type {
            return PickerOutcome::ignored();
        }
        if formats != self.formats {
            self.full_format = formats.full_format();
            self.default_view_mode = default_view_mode(formats.date_format(), formats.time_format());
            self.view_mode = Derived::new(self.default_view_mode);
            self.formats = formats;
            if self.default_view_mode.is_none() {
                warn!("date and time formats are both suppressed; calendar disabled");
            }
        }
        self.explicit_date_type = mode;
        self.refresh_derived();
        self.replay()
    }

    fn replay(&mut self) -> PickerOutcome {
        debug!(
            full_format = %self.full_format,
            mode = self.date_type_mode().as_str(),
            "configuration changed"
        );
        self.stepper.cancel(Instant::now());
        self.reset_transient();
        match self.value_as_date {
            Some(value) => self.set_selected_date(value, true),
            None => PickerOutcome::handled(),
        }
    }

    // --- internals ---

    fn coordinator(&self) -> ChangeCoordinator<'_> {
        ChangeCoordinator::new(self.date_type_mode(), &self.full_format, self.normalizer())
    }

    fn apply_value(&mut self, value: Value) {
        self.value = value;
        self.refresh_derived();
    }

    fn step_timestamp(&mut self, press: Press) {
        let next = self
            .time_constraints
            .apply(press.direction, press.unit, self.view_timestamp());
        self.view_timestamp.set(next);
    }

    fn refresh_derived(&mut self) {
        self.value_as_date = self.normalizer().parse(&self.value, &self.full_format);
        let view_date = self
            .value_as_date
            .unwrap_or_else(|| calendar::start_of_day(self.today));
        self.view_date.rederive(view_date);
        self.refresh_timestamp();
    }

    fn refresh_timestamp(&mut self) {
        let timestamp = self.value_as_date.unwrap_or(*self.view_date.get());
        self.view_timestamp.rederive(timestamp);
    }

    fn reset_transient(&mut self) {
        self.view_mode.reset();
        self.view_date.reset();
        self.view_timestamp.reset();
        self.refresh_timestamp();
    }
}
