use super::{Cell, CellFlags, Grid, ViewContext};
use crate::core::calendar::{self, Unit};
use chrono::Datelike;

pub const ROWS: usize = 6;
pub const COLUMNS: usize = 7;

/// Six weeks starting on the Sunday before the first of the view month.
pub fn build(ctx: &ViewContext<'_>) -> Grid {
    let view = ctx.view_date;
    let month_start = calendar::start_of(view, Unit::Month);
    let month_end = calendar::end_of(view, Unit::Month);
    let previous_month_end = calendar::end_of(calendar::add_unit(view, -1, Unit::Month), Unit::Month);
    let first = calendar::start_of_week(previous_month_end.date());

    let mut rows = Vec::with_capacity(ROWS);
    let mut working = first.and_time(view.time());
    for _ in 0..ROWS {
        let mut row = Vec::with_capacity(COLUMNS);
        for _ in 0..COLUMNS {
            row.push(Cell {
                value: working,
                label: working.day().to_string(),
                flags: CellFlags {
                    old: working < month_start,
                    new: working > month_end,
                    active: ctx
                        .selected
                        .is_some_and(|selected| calendar::is_same_unit(selected, working, Unit::Day)),
                    today: working.date() == ctx.today,
                    disabled: !ctx.is_valid(&working),
                },
            });
            working = calendar::add_unit(working, 1, Unit::Day);
        }
        rows.push(row);
    }

    Grid {
        title: ctx.format(view, "MMMM YYYY"),
        columns: ctx
            .locale
            .weekdays_min
            .iter()
            .map(|name| name.to_string())
            .collect(),
        rows,
        footer: ctx.time_format.map(|format| ctx.format(view, format)),
    }
}
