use super::{Cell, CellFlags, Grid, ViewContext};
use crate::core::calendar::{self, Unit};
use chrono::{Datelike, NaiveTime};

pub const ROWS: usize = 3;
pub const COLUMNS: usize = 4;

pub fn build(ctx: &ViewContext<'_>) -> Grid {
    let view = ctx.view_date;
    let year = view.year();

    let rows = (0..ROWS)
        .map(|row| {
            (0..COLUMNS)
                .map(|col| {
                    let month = (row * COLUMNS + col) as u32 + 1;
                    let value = calendar::with_month(view, month);
                    let days = calendar::days_of_month(year, month).map(|day| day.and_time(NaiveTime::MIN));
                    Cell {
                        value,
                        label: ctx.locale.month_short(month).to_string(),
                        flags: CellFlags {
                            active: ctx
                                .selected
                                .is_some_and(|selected| calendar::is_same_unit(selected, value, Unit::Month)),
                            today: ctx.today.year() == year && ctx.today.month() == month,
                            disabled: ctx.rejects_all(days),
                            ..CellFlags::default()
                        },
                    }
                })
                .collect()
        })
        .collect();

    Grid {
        title: ctx.format(view, "YYYY"),
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
    fn twelve_months_keep_view_day_and_time() {
        let locale = Locale::english();
        let grid = build(&context(&locale, at(2015, 1, 31)));
        assert_eq!(grid.title, "2015");
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 4);

        let labels: Vec<_> = grid.cells().map(|cell| cell.label.as_str()).collect();
        assert_eq!(labels[0], "Jan");
        assert_eq!(labels[11], "Dec");

        let february = grid.cell(0, 1).expect("february");
        assert_eq!(february.value, at(2015, 2, 28));
        assert!(grid.cell(1, 1).is_some_and(|june| june.flags.today));
    }

    #[test]
    fn month_disabled_only_when_every_day_rejected() {
        let locale = Locale::english();
        let predicate = |value: &CalendarValue| !(value.month() == 3 || (value.month() == 4 && value.day() < 30));
        let mut ctx = context(&locale, at(2015, 6, 16));
        ctx.selected = Some(at(2015, 11, 2));
        ctx.is_valid_date = Some(&predicate);
        let grid = build(&ctx);

        let march = grid.cell(0, 2).expect("march");
        let april = grid.cell(0, 3).expect("april");
        assert!(march.flags.disabled);
        assert!(!april.flags.disabled);
        assert!(grid.cell(2, 2).is_some_and(|november| november.flags.active));
    }

    #[test]
    fn nothing_disabled_without_predicate() {
        let locale = Locale::english();
        let grid = build(&context(&locale, at(2015, 6, 16)));
        assert!(grid.cells().all(|cell| !cell.flags.disabled));
    }
}
