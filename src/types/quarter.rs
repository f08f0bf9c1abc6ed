use chrono::{Datelike, Month};
use serde::Serialize;
use std::fmt;

/// A calendar quarter: three consecutive months starting in January, April,
/// July or October.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Quarter {
    Q1 = 1,
    Q2 = 2,
    Q3 = 3,
    Q4 = 4,
}

const QUARTER_MONTHS: [[Month; 3]; 4] = [
    [Month::January, Month::February, Month::March],
    [Month::April, Month::May, Month::June],
    [Month::July, Month::August, Month::September],
    [Month::October, Month::November, Month::December],
];

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Returns the quarter a date falls in.
    pub fn of<D: Datelike>(date: &D) -> Quarter {
        Quarter::ALL[(date.month0() / 3) as usize]
    }

    /// The quarter number (1 through 4) stored in the `quarter` column.
    pub fn number(self) -> u32 {
        self as u32
    }

    /// The three months of this quarter, in calendar order.
    pub fn months(self) -> [Month; 3] {
        QUARTER_MONTHS[self as usize - 1]
    }
}

impl TryFrom<u32> for Quarter {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Quarter::Q1),
            2 => Ok(Quarter::Q2),
            3 => Ok(Quarter::Q3),
            4 => Ok(Quarter::Q4),
            other => Err(other),
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_quarter_of_date() {
        let cases = [
            (1, Quarter::Q1),
            (3, Quarter::Q1),
            (4, Quarter::Q2),
            (6, Quarter::Q2),
            (7, Quarter::Q3),
            (9, Quarter::Q3),
            (10, Quarter::Q4),
            (12, Quarter::Q4),
        ];
        for (month, quarter) in cases {
            let date = NaiveDate::from_ymd_opt(2019, month, 15).unwrap();
            assert_eq!(Quarter::of(&date), quarter, "month {}", month);
        }
    }

    #[test]
    fn test_quarter_months_contain_their_own_months() {
        for quarter in Quarter::ALL {
            for month in quarter.months() {
                let date = NaiveDate::from_ymd_opt(2021, month.number_from_month(), 1).unwrap();
                assert_eq!(Quarter::of(&date), quarter);
            }
        }
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(Quarter::try_from(2), Ok(Quarter::Q2));
        assert_eq!(Quarter::try_from(0), Err(0));
        assert_eq!(Quarter::try_from(5), Err(5));
        assert_eq!(Quarter::Q3.to_string(), "Q3");
    }
}
