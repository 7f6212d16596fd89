use chrono::{
    DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc,
};

/// A point in time at millisecond precision.
///
/// Values are wall-clock readings interpreted as UTC everywhere: parsing,
/// formatting, comparison and the epoch-millisecond conversion all agree.
pub type CalendarValue = NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn start_of_day(date: NaiveDate) -> CalendarValue {
    date.and_time(NaiveTime::MIN)
}

pub fn to_epoch_millis(value: CalendarValue) -> i64 {
    value.and_utc().timestamp_millis()
}

pub fn from_epoch_millis(millis: i64) -> Option<CalendarValue> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Adds `amount` units, carrying into larger units. Month and year steps
/// clamp the day to the target month. Out-of-range results leave the value
/// unchanged.
pub fn add_unit(value: CalendarValue, amount: i64, unit: Unit) -> CalendarValue {
    let shifted = match unit {
        Unit::Year => add_months(value, amount.saturating_mul(12)),
        Unit::Month => add_months(value, amount),
        Unit::Day => TimeDelta::try_days(amount).and_then(|d| value.checked_add_signed(d)),
        Unit::Hour => TimeDelta::try_hours(amount).and_then(|d| value.checked_add_signed(d)),
        Unit::Minute => TimeDelta::try_minutes(amount).and_then(|d| value.checked_add_signed(d)),
        Unit::Second => TimeDelta::try_seconds(amount).and_then(|d| value.checked_add_signed(d)),
        Unit::Millisecond => {
            TimeDelta::try_milliseconds(amount).and_then(|d| value.checked_add_signed(d))
        }
    };
    shifted.unwrap_or(value)
}

fn add_months(value: CalendarValue, months: i64) -> Option<CalendarValue> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        value.checked_add_months(Months::new(magnitude))
    } else {
        value.checked_sub_months(Months::new(magnitude))
    }
}

pub fn start_of(value: CalendarValue, unit: Unit) -> CalendarValue {
    let date = value.date();
    let time = value.time();
    let truncated = match unit {
        Unit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).map(start_of_day),
        Unit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1).map(start_of_day),
        Unit::Day => Some(start_of_day(date)),
        Unit::Hour => NaiveTime::from_hms_opt(time.hour(), 0, 0).map(|t| date.and_time(t)),
        Unit::Minute => {
            NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).map(|t| date.and_time(t))
        }
        Unit::Second => NaiveTime::from_hms_opt(time.hour(), time.minute(), time.second())
            .map(|t| date.and_time(t)),
        Unit::Millisecond => NaiveTime::from_hms_milli_opt(
            time.hour(),
            time.minute(),
            time.second(),
            millisecond(value),
        )
        .map(|t| date.and_time(t)),
    };
    truncated.unwrap_or(value)
}

/// Last millisecond of the unit containing `value`.
pub fn end_of(value: CalendarValue, unit: Unit) -> CalendarValue {
    let next = add_unit(start_of(value, unit), 1, unit);
    add_unit(next, -1, Unit::Millisecond)
}

pub fn is_same_unit(a: CalendarValue, b: CalendarValue, unit: Unit) -> bool {
    start_of(a, unit) == start_of(b, unit)
}

/// Sunday that starts the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = i64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_signed(TimeDelta::days(back)).unwrap_or(date)
}

pub fn millisecond(value: CalendarValue) -> u32 {
    (value.nanosecond() / 1_000_000) % 1000
}

/// Moves `value` into `month` (1-based), clamping the day.
pub fn with_month(value: CalendarValue, month: u32) -> CalendarValue {
    let year = value.year();
    let day = value.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.and_time(value.time()))
        .unwrap_or(value)
}

/// Moves `value` into `year`, clamping Feb 29 on non-leap years.
pub fn with_year(value: CalendarValue, year: i32) -> CalendarValue {
    let month = value.month();
    let day = value.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.and_time(value.time()))
        .unwrap_or(value)
}

pub fn days_of_month(year: i32, month: u32) -> impl Iterator<Item = NaiveDate> {
    (1..=days_in_month(year, month)).filter_map(move |day| NaiveDate::from_ymd_opt(year, month, day))
}

pub fn days_of_year(year: i32) -> impl Iterator<Item = NaiveDate> {
    (1..=12u32).flat_map(move |month| days_of_month(year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, ms: u32) -> CalendarValue {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_milli_opt(h, min, s, ms))
            .expect("valid datetime")
    }

    #[test]
    fn month_steps_clamp_day() {
        let jan31 = at(2021, 1, 31, 10, 0, 0, 0);
        assert_eq!(add_unit(jan31, 1, Unit::Month), at(2021, 2, 28, 10, 0, 0, 0));
        assert_eq!(add_unit(jan31, -2, Unit::Month), at(2020, 11, 30, 10, 0, 0, 0));
        assert_eq!(add_unit(at(2020, 2, 29, 0, 0, 0, 0), 1, Unit::Year), at(2021, 2, 28, 0, 0, 0, 0));
    }

    #[test]
    fn time_steps_carry_into_date() {
        let late = at(2019, 12, 31, 23, 59, 0, 0);
        assert_eq!(add_unit(late, 1, Unit::Minute), at(2020, 1, 1, 0, 0, 0, 0));
        assert_eq!(add_unit(late, -24, Unit::Hour), at(2019, 12, 30, 23, 59, 0, 0));
    }

    #[test]
    fn start_and_end_of_month() {
        let value = at(2024, 2, 14, 8, 30, 12, 250);
        assert_eq!(start_of(value, Unit::Month), at(2024, 2, 1, 0, 0, 0, 0));
        assert_eq!(end_of(value, Unit::Month), at(2024, 2, 29, 23, 59, 59, 999));
        assert_eq!(start_of(value, Unit::Second), at(2024, 2, 14, 8, 30, 12, 0));
    }

    #[test]
    fn same_unit_compares_truncated_values() {
        let a = at(2015, 6, 16, 1, 0, 0, 0);
        let b = at(2015, 6, 16, 23, 0, 0, 0);
        assert!(is_same_unit(a, b, Unit::Day));
        assert!(!is_same_unit(a, b, Unit::Hour));
    }

    #[test]
    fn week_starts_on_sunday() {
        let wednesday = NaiveDate::from_ymd_opt(2015, 6, 17).expect("date");
        assert_eq!(start_of_week(wednesday), NaiveDate::from_ymd_opt(2015, 6, 14).expect("date"));
    }

    #[test]
    fn epoch_millis_round_trip() {
        let value = at(2015, 6, 16, 0, 0, 0, 0);
        assert_eq!(to_epoch_millis(value), 1_434_412_800_000);
        assert_eq!(from_epoch_millis(1_434_412_800_000), Some(value));
    }
}
