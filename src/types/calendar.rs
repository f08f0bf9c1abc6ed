//! Calendar attributes derived from a single observation date.

use crate::types::quarter::Quarter;
use crate::types::season::Season;
use chrono::{Datelike, Month, NaiveDate};
use serde::Serialize;

/// The twelve months in calendar order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Full English month name, e.g. `"January"`.
pub fn month_name(month: Month) -> &'static str {
    month.name()
}

/// Three letter month abbreviation, e.g. `"Jan"`.
pub fn month_abbreviation(month: Month) -> &'static str {
    let name = month.name();
    &name[..3]
}

/// Calendar attributes of one date.
///
/// Every field is a pure function of the date; deriving twice from the same
/// date yields identical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarFeatures {
    /// Day of the week, Monday = 0 through Sunday = 6.
    pub day_of_week: u32,
    /// Month, 1 through 12.
    pub month: u32,
    pub year: i32,
    pub quarter: Quarter,
    /// Ordinal day, 1 through 366.
    pub day_of_year: u32,
    /// Day of the month, 1 through 31.
    pub day_of_month: u32,
    /// ISO-8601 week number, 1 through 53.
    pub week_of_year: u32,
    pub season: Season,
}

impl From<NaiveDate> for CalendarFeatures {
    fn from(date: NaiveDate) -> Self {
        CalendarFeatures {
            day_of_week: date.weekday().num_days_from_monday(),
            month: date.month(),
            year: date.year(),
            quarter: Quarter::of(&date),
            day_of_year: date.ordinal(),
            day_of_month: date.day(),
            week_of_year: date.iso_week().week(),
            season: Season::of(&date),
        }
    }
}
