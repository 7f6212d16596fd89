/// Names used by the textual format tokens. Weekday arrays start on Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub name: &'static str,
    pub months: [&'static str; 12],
    pub months_short: [&'static str; 12],
    pub weekdays: [&'static str; 7],
    pub weekdays_short: [&'static str; 7],
    pub weekdays_min: [&'static str; 7],
    pub meridiem: [&'static str; 2],
}

const ENGLISH: Locale = Locale {
    name: "en",
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekdays: [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    weekdays_short: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    weekdays_min: ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
    meridiem: ["AM", "PM"],
};

const GERMAN: Locale = Locale {
    name: "de",
    months: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    months_short: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
        "Dez.",
    ],
    weekdays: [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ],
    weekdays_short: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
    weekdays_min: ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
    meridiem: ["AM", "PM"],
};

impl Locale {
    pub fn english() -> Self {
        ENGLISH
    }

    /// Looks up a built-in locale by its language tag (`en`, `en-US`, `de`, ...).
    pub fn by_name(name: &str) -> Option<Self> {
        let language = name
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Some(ENGLISH),
            "de" => Some(GERMAN),
            _ => None,
        }
    }

    pub fn month_name(&self, month: u32) -> &'static str {
        self.months[(month as usize).saturating_sub(1) % 12]
    }

    pub fn month_short(&self, month: u32) -> &'static str {
        self.months_short[(month as usize).saturating_sub(1) % 12]
    }

    pub fn meridiem(&self, hour: u32, lowercase: bool) -> String {
        let label = if hour >= 12 {
            self.meridiem[1]
        } else {
            self.meridiem[0]
        };
        if lowercase {
            label.to_lowercase()
        } else {
            label.to_string()
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}
