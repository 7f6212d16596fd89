use super::{Counter, TimePanel, ViewContext};
use crate::format::token::{FieldRole, has_role, tokenize};
use crate::picker::time_constraints::TimeUnit;

pub fn build(ctx: &ViewContext<'_>) -> TimePanel {
    let timestamp = ctx.view_timestamp;
    let tokens = tokenize(ctx.time_format.unwrap_or_default());
    let has_day_part = has_role(&tokens, FieldRole::Meridiem);

    let mut counters = Vec::new();
    let mut push = |unit: TimeUnit, format: &str| {
        counters.push(Counter {
            unit,
            label: ctx.format(timestamp, format),
        });
    };
    if has_role(&tokens, FieldRole::Hour) {
        push(TimeUnit::Hours, if has_day_part { "h" } else { "H" });
    }
    if has_role(&tokens, FieldRole::Minute) {
        push(TimeUnit::Minutes, "mm");
    }
    if has_role(&tokens, FieldRole::Second) {
        push(TimeUnit::Seconds, "ss");
    }
    if has_role(&tokens, FieldRole::Millisecond) {
        push(TimeUnit::Milliseconds, "SSS");
    }

    TimePanel {
        title: ctx.date_format.map(|format| ctx.format(timestamp, format)),
        counters,
        day_part: has_day_part.then(|| ctx.format(timestamp, "A")),
    }
}
