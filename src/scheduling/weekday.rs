//! Weekday numbering and labels
//!
//! The domain numbers weekdays Monday=1 .. Sunday=7. Dates are numbered by
//! [`weekday_number`] straight from chrono's Monday-based count;
//! [`from_sunday_based`] converts a Sunday=0 .. Saturday=6 number.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Language used for weekday labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LabelLocale {
    #[default]
    Ru,
    En,
}

/// Weekday number of a date, Monday=1 .. Sunday=7
pub fn weekday_number(date: NaiveDate) -> i16 {
    date.weekday().number_from_monday() as i16
}

/// Remap a Sunday=0 .. Saturday=6 weekday to Monday=1 .. Sunday=7
pub fn from_sunday_based(day: i16) -> Option<i16> {
    match day {
        0 => Some(7),
        1..=6 => Some(day),
        _ => None,
    }
}

/// Whether a weekday number is in the Monday=1 .. Sunday=7 range
pub fn is_valid_weekday(day: i16) -> bool {
    (1..=7).contains(&day)
}

/// Short weekday name
pub fn short_label(weekday: Weekday, locale: LabelLocale) -> &'static str {
    match locale {
        LabelLocale::Ru => match weekday {
            Weekday::Mon => "Пн",
            Weekday::Tue => "Вт",
            Weekday::Wed => "Ср",
            Weekday::Thu => "Чт",
            Weekday::Fri => "Пт",
            Weekday::Sat => "Сб",
            Weekday::Sun => "Вс",
        },
        LabelLocale::En => match weekday {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        },
    }
}

/// Date as shown in grids, `DD.MM.YYYY`
pub fn date_string(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Slot-picker label: the date followed by the short weekday on a new line
pub fn date_label(date: NaiveDate, locale: LabelLocale) -> String {
    format!("{}\n({})", date_string(date), short_label(date.weekday(), locale))
}
