use regex::Regex;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]*)\]|YYYY|YY|M{1,4}|D{1,2}|d{1,4}|H{1,2}|h{1,2}|m{1,2}|s{1,2}|SSS|A|a")
        .expect("Invalid format token pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Year,
    Month,
    Day,
    Weekday,
    Hour,
    Minute,
    Second,
    Millisecond,
    Meridiem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldToken {
    /// `YYYY`
    Year4,
    /// `YY`
    Year2,
    /// `M`
    Month,
    /// `MM`
    MonthPadded,
    /// `MMM`
    MonthShort,
    /// `MMMM`
    MonthLong,
    /// `D`
    Day,
    /// `DD`
    DayPadded,
    /// `d`
    WeekdayNumber,
    /// `dd`
    WeekdayMin,
    /// `ddd`
    WeekdayShort,
    /// `dddd`
    WeekdayLong,
    /// `H`
    Hour24,
    /// `HH`
    Hour24Padded,
    /// `h`
    Hour12,
    /// `hh`
    Hour12Padded,
    /// `m`
    Minute,
    /// `mm`
    MinutePadded,
    /// `s`
    Second,
    /// `ss`
    SecondPadded,
    /// `SSS`
    Millisecond,
    /// `A`
    MeridiemUpper,
    /// `a`
    MeridiemLower,
}

impl FieldToken {
    fn from_pattern(pattern: &str) -> Option<Self> {
        let token = match pattern {
            "YYYY" => Self::Year4,
            "YY" => Self::Year2,
            "M" => Self::Month,
            "MM" => Self::MonthPadded,
            "MMM" => Self::MonthShort,
            "MMMM" => Self::MonthLong,
            "D" => Self::Day,
            "DD" => Self::DayPadded,
            "d" => Self::WeekdayNumber,
            "dd" => Self::WeekdayMin,
            "ddd" => Self::WeekdayShort,
            "dddd" => Self::WeekdayLong,
            "H" => Self::Hour24,
            "HH" => Self::Hour24Padded,
            "h" => Self::Hour12,
            "hh" => Self::Hour12Padded,
            "m" => Self::Minute,
            "mm" => Self::MinutePadded,
            "s" => Self::Second,
            "ss" => Self::SecondPadded,
            "SSS" => Self::Millisecond,
            "A" => Self::MeridiemUpper,
            "a" => Self::MeridiemLower,
            _ => return None,
        };
        Some(token)
    }

    pub fn role(self) -> FieldRole {
        match self {
            Self::Year4 | Self::Year2 => FieldRole::Year,
            Self::Month | Self::MonthPadded | Self::MonthShort | Self::MonthLong => {
                FieldRole::Month
            }
            Self::Day | Self::DayPadded => FieldRole::Day,
            Self::WeekdayNumber | Self::WeekdayMin | Self::WeekdayShort | Self::WeekdayLong => {
                FieldRole::Weekday
            }
            Self::Hour24 | Self::Hour24Padded | Self::Hour12 | Self::Hour12Padded => {
                FieldRole::Hour
            }
            Self::Minute | Self::MinutePadded => FieldRole::Minute,
            Self::Second | Self::SecondPadded => FieldRole::Second,
            Self::Millisecond => FieldRole::Millisecond,
            Self::MeridiemUpper | Self::MeridiemLower => FieldRole::Meridiem,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatToken {
    Literal(String),
    Field(FieldToken),
}

/// Splits a format string into fields and literal runs. `[...]` escapes its
/// contents; unknown letters are literals.
pub fn tokenize(format: &str) -> Vec<FormatToken> {
    let mut tokens = Vec::<FormatToken>::new();
    let mut cursor = 0usize;

    for captures in TOKEN_PATTERN.captures_iter(format) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        push_literal(&mut tokens, &format[cursor..whole.start()]);
        cursor = whole.end();

        if let Some(escaped) = captures.get(1) {
            push_literal(&mut tokens, escaped.as_str());
            continue;
        }
        match FieldToken::from_pattern(whole.as_str()) {
            Some(field) => tokens.push(FormatToken::Field(field)),
            None => push_literal(&mut tokens, whole.as_str()),
        }
    }
    push_literal(&mut tokens, &format[cursor..]);

    tokens
}

pub fn has_role(tokens: &[FormatToken], role: FieldRole) -> bool {
    tokens
        .iter()
        .any(|token| matches!(token, FormatToken::Field(field) if field.role() == role))
}

fn push_literal(tokens: &mut Vec<FormatToken>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(FormatToken::Literal(previous)) = tokens.last_mut() {
        previous.push_str(text);
        return;
    }
    tokens.push(FormatToken::Literal(text.to_string()));
}
