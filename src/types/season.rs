//! Defines the `Season` enum, the four local climate seasons used to group months.

use chrono::Datelike;
use serde::Serialize;
use std::fmt;

/// One of the four fixed climate seasons.
///
/// The discriminant is the season number used in the derived `season` column
/// (1 through 4). Every calendar month belongs to exactly one season:
///
/// | Season | Months |
/// |---|---|
/// | [`Season::HotAndDry`] (1) | December, January, February |
/// | [`Season::LongRains`] (2) | March, April, May |
/// | [`Season::DrySeason`] (3) | June, July, August |
/// | [`Season::ShortRains`] (4) | September, October, November |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Season {
    /// Season 1: December through February.
    HotAndDry = 1,
    /// Season 2: March through May.
    LongRains = 2,
    /// Season 3: June through August.
    DrySeason = 3,
    /// Season 4: September through November.
    ShortRains = 4,
}

// Indexed by zero-based month.
const SEASON_BY_MONTH0: [Season; 12] = [
    Season::HotAndDry,
    Season::HotAndDry,
    Season::LongRains,
    Season::LongRains,
    Season::LongRains,
    Season::DrySeason,
    Season::DrySeason,
    Season::DrySeason,
    Season::ShortRains,
    Season::ShortRains,
    Season::ShortRains,
    Season::HotAndDry,
];

impl Season {
    /// All seasons in season-number order.
    pub const ALL: [Season; 4] = [
        Season::HotAndDry,
        Season::LongRains,
        Season::DrySeason,
        Season::ShortRains,
    ];

    /// Returns the season a date falls in.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use climate_dash::Season;
    ///
    /// let date = NaiveDate::from_ymd_opt(2021, 12, 25).unwrap();
    /// assert_eq!(Season::of(&date), Season::HotAndDry);
    /// ```
    pub fn of<D: Datelike>(date: &D) -> Season {
        SEASON_BY_MONTH0[date.month0() as usize]
    }

    /// Looks up the season for a month number (1 = January).
    ///
    /// Returns `None` for anything outside 1..=12.
    pub fn from_month(month: u32) -> Option<Season> {
        let month0 = month.checked_sub(1)?;
        SEASON_BY_MONTH0.get(month0 as usize).copied()
    }

    /// The season number (1 through 4) stored in the `season` column.
    pub fn number(self) -> u32 {
        self as u32
    }

    /// Human readable season name, used as the chart label.
    pub fn name(self) -> &'static str {
        match self {
            Season::HotAndDry => "Hot and Dry",
            Season::LongRains => "Long Rains",
            Season::DrySeason => "Dry Season",
            Season::ShortRains => "Short Rains",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_every_month_maps_to_one_season() {
        for month in 1..=12 {
            let season = Season::from_month(month).expect("month in range");
            assert!((1..=4).contains(&season.number()));
            // Stable across calls
            assert_eq!(Season::from_month(month), Some(season));
        }
    }

    #[test]
    fn test_season_mapping_matches_table() {
        let expected = [
            (12, Season::HotAndDry),
            (1, Season::HotAndDry),
            (2, Season::HotAndDry),
            (3, Season::LongRains),
            (4, Season::LongRains),
            (5, Season::LongRains),
            (6, Season::DrySeason),
            (7, Season::DrySeason),
            (8, Season::DrySeason),
            (9, Season::ShortRains),
            (10, Season::ShortRains),
            (11, Season::ShortRains),
        ];
        for (month, season) in expected {
            assert_eq!(Season::from_month(month), Some(season), "month {}", month);
        }
    }

    #[test]
    fn test_out_of_range_months() {
        assert_eq!(Season::from_month(0), None);
        assert_eq!(Season::from_month(13), None);
    }

    #[test]
    fn test_season_of_date_agrees_with_month_lookup() {
        let mut date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        while date.year() == 2020 {
            assert_eq!(Some(Season::of(&date)), Season::from_month(date.month()));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_season_names() {
        let names: Vec<&str> = Season::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            ["Hot and Dry", "Long Rains", "Dry Season", "Short Rains"]
        );
        assert_eq!(Season::LongRains.to_string(), "Long Rains");
    }
}
