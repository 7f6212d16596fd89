use super::{Cell, CellFlags, Grid, ViewContext};
use crate::core::calendar;
use chrono::{Datelike, NaiveTime};

pub const ROWS: usize = 3;
pub const COLUMNS: usize = 4;

/// Decade page: one year either side of the decade containing the view date.
pub fn build(ctx: &ViewContext<'_>) -> Grid {
    let view = ctx.view_date;
    let decade_start = view.year().div_euclid(10) * 10;
    let decade_end = decade_start + 9;

    let rows = (0..ROWS)
        .map(|row| {
            (0..COLUMNS)
                .map(|col| {
                    let year = decade_start - 1 + (row * COLUMNS + col) as i32;
                    let value = calendar::with_year(view, year);
                    let days = calendar::days_of_year(year).map(|day| day.and_time(NaiveTime::MIN));
                    Cell {
                        value,
                        label: year.to_string(),
                        flags: CellFlags {
                            old: year < decade_start,
                            new: year > decade_end,
                            active: ctx.selected.is_some_and(|selected| selected.year() == year),
                            today: ctx.today.year() == year,
                            disabled: ctx.rejects_all(days),
                        },
                    }
                })
                .collect()
        })
        .collect();

    Grid {
        title: format!("{decade_start}-{decade_end}"),
        columns: Vec::new(),
        rows,
        footer: None,
    }
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::core::calendar::CalendarValue;
    use crate::format::Locale;
    use crate::views::fixtures::{at, context};
    use chrono::Datelike;

    #[test]
    fn decade_page_spans_twelve_years() {
        let locale = Locale::english();
        let grid = build(&context(&locale, at(2015, 6, 16)));
        assert_eq!(grid.title, "2010-2019");

        let first = grid.cell(0, 0).expect("first");
        assert_eq!(first.label, "2009");
        assert!(first.flags.old);
        let last = grid.cell(2, 3).expect("last");
        assert_eq!(last.label, "2020");
        assert!(last.flags.new);
        assert_eq!(grid.cell(1, 2).map(|cell| cell.value), Some(at(2015, 6, 16)));
    }

    #[test]
    fn leap_day_clamps_in_other_years() {
        let locale = Locale::english();
        let grid = build(&context(&locale, at(2016, 2, 29)));
        assert_eq!(grid.cell(0, 2).map(|cell| cell.value), Some(at(2011, 2, 28)));
    }

    #[test]
    fn year_disabled_by_its_own_days() {
        let locale = Locale::english();
        let predicate = |value: &CalendarValue| value.year() != 2012;
        let mut ctx = context(&locale, at(2015, 6, 16));
        ctx.selected = Some(at(2013, 1, 1));
        ctx.is_valid_date = Some(&predicate);
        let grid = build(&ctx);

        let disabled: Vec<_> = grid
            .cells()
            .filter(|cell| cell.flags.disabled)
            .map(|cell| cell.label.as_str())
            .collect();
        assert_eq!(disabled, vec!["2012"]);
        assert!(grid.cell(1, 0).is_some_and(|cell| cell.label == "2013" && cell.flags.active));
    }
}
