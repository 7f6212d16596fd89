pub mod days;
pub mod months;
pub mod time;
pub mod years;

use crate::core::calendar::CalendarValue;
use crate::format::{Locale, Normalizer};
use crate::picker::time_constraints::TimeUnit;
use crate::picker::view_mode::ViewMode;
use chrono::NaiveDate;

/// Read-only inputs shared by every calendar view.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub view_date: CalendarValue,
    pub view_timestamp: CalendarValue,
    pub selected: Option<CalendarValue>,
    pub today: NaiveDate,
    pub locale: &'a Locale,
    pub date_format: Option<&'a str>,
    pub time_format: Option<&'a str>,
    pub is_valid_date: Option<&'a (dyn Fn(&CalendarValue) -> bool + Send + Sync)>,
}

impl<'a> ViewContext<'a> {
    pub fn is_valid(&self, value: &CalendarValue) -> bool {
        self.is_valid_date.is_none_or(|predicate| predicate(value))
    }

    /// True when a predicate exists and rejects every value yielded.
    pub fn rejects_all(&self, mut values: impl Iterator<Item = CalendarValue>) -> bool {
        match self.is_valid_date {
            Some(predicate) => values.all(|value| !predicate(&value)),
            None => false,
        }
    }

    pub fn format(&self, value: CalendarValue, format: &str) -> String {
        Normalizer::new(self.locale, self.today).format(value, format)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFlags {
    /// Before the displayed page (previous month / previous decade).
    pub old: bool,
    /// After the displayed page.
    pub new: bool,
    pub active: bool,
    pub today: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CalendarValue,
    pub label: String,
    pub flags: CellFlags,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub title: String,
    /// Column headings; empty when the grid has none.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub footer: Option<String>,
}

impl Grid {
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn position_of(&self, predicate: impl Fn(&Cell) -> bool) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|cell| predicate(cell))
                .map(|col| (row, col))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub unit: TimeUnit,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePanel {
    pub title: Option<String>,
    pub counters: Vec<Counter>,
    pub day_part: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarView {
    Years(Grid),
    Months(Grid),
    Days(Grid),
    Time(TimePanel),
}

impl CalendarView {
    pub fn build(mode: ViewMode, ctx: &ViewContext<'_>) -> Self {
        match mode {
            ViewMode::Years => Self::Years(years::build(ctx)),
            ViewMode::Months => Self::Months(months::build(ctx)),
            ViewMode::Days => Self::Days(days::build(ctx)),
            ViewMode::Time => Self::Time(time::build(ctx)),
        }
    }

    pub fn mode(&self) -> ViewMode {
        match self {
            Self::Years(_) => ViewMode::Years,
            Self::Months(_) => ViewMode::Months,
            Self::Days(_) => ViewMode::Days,
            Self::Time(_) => ViewMode::Time,
        }
    }

    pub fn grid(&self) -> Option<&Grid> {
        match self {
            Self::Years(grid) | Self::Months(grid) | Self::Days(grid) => Some(grid),
            Self::Time(_) => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Years(grid) | Self::Months(grid) | Self::Days(grid) => Some(grid.title.as_str()),
            Self::Time(panel) => panel.title.as_deref(),
        }
    }

    pub fn footer(&self) -> Option<&str> {
        self.grid().and_then(|grid| grid.footer.as_deref())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ViewContext;
    use crate::core::calendar::CalendarValue;
    use crate::format::Locale;
    use chrono::NaiveDate;

    pub fn at(y: i32, m: u32, d: u32) -> CalendarValue {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(10, 30, 0))
            .expect("valid datetime")
    }

    pub fn context(locale: &Locale, view_date: CalendarValue) -> ViewContext<'_> {
        ViewContext {
            view_date,
            view_timestamp: view_date,
            selected: None,
            today: NaiveDate::from_ymd_opt(2015, 6, 20).expect("date"),
            locale,
            date_format: Some("MM/DD/YYYY"),
            time_format: None,
            is_valid_date: None,
        }
    }
}
