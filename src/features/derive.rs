//! Calendar feature derivation for a dated observation table.

use crate::features::error::FeatureError;
use crate::frames::feature_frame::FeatureFrame;
use crate::types::calendar::CalendarFeatures;
use crate::utils::is_numeric_dtype;
use chrono::NaiveDate;
use log::debug;
use polars::prelude::*;

pub const COL_DAY_OF_WEEK: &str = "day_of_week";
pub const COL_MONTH: &str = "month";
pub const COL_YEAR: &str = "year";
pub const COL_QUARTER: &str = "quarter";
pub const COL_DAY_OF_YEAR: &str = "day_of_year";
pub const COL_DAY_OF_MONTH: &str = "day_of_month";
pub const COL_WEEK_OF_YEAR: &str = "week_of_year";
pub const COL_SEASON: &str = "season";

/// Names of the columns appended by [`derive_features`], in the order they are added.
pub const DERIVED_COLUMNS: [&str; 8] = [
    COL_DAY_OF_WEEK,
    COL_MONTH,
    COL_YEAR,
    COL_QUARTER,
    COL_DAY_OF_YEAR,
    COL_DAY_OF_MONTH,
    COL_WEEK_OF_YEAR,
    COL_SEASON,
];

/// Parses a `YYYYMMDD` timestamp. Anything but exactly eight ASCII digits
/// naming a real Gregorian date is rejected.
pub(crate) fn parse_yyyymmdd(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = raw[0..4].parse().ok()?;
    let month = raw[4..6].parse().ok()?;
    let day = raw[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Decorates every row of `frame` with calendar attributes derived from its date.
///
/// The date column may hold `YYYYMMDD` values as strings or integers. It is
/// replaced by a polars `Date` column and becomes the key of the returned
/// [`FeatureFrame`]: rows are sorted by it and each date occurs once.
/// The eight columns in [`DERIVED_COLUMNS`] are appended as `Int32`.
///
/// The input frame is consumed; work with the returned frame from then on.
///
/// # Errors
///
/// * [`FeatureError::MissingDateColumn`] if `date_column` does not exist.
/// * [`FeatureError::Parse`] for the first value that is null or not a valid
///   eight digit date. No row is skipped.
/// * [`FeatureError::DuplicateTimestamp`] if a date appears twice.
///
/// # Examples
///
/// ```
/// use climate_dash::derive_features;
/// use polars::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let raw = df!(
///     "ID" => &[20200102i64, 20200101],
///     "rainfall" => &[3.5, 0.0],
/// )?;
/// let features = derive_features(raw, "ID")?;
/// assert_eq!(features.height(), 2);
/// assert_eq!(features.years()?, vec![2020]);
/// # Ok(())
/// # }
/// ```
pub fn derive_features(frame: DataFrame, date_column: &str) -> Result<FeatureFrame, FeatureError> {
    let dates = parse_date_column(&frame, date_column)?;
    ensure_unique(&dates)?;

    let value_columns: Vec<String> = frame
        .get_columns()
        .iter()
        .filter(|c| c.name().as_str() != date_column)
        .filter(|c| !DERIVED_COLUMNS.contains(&c.name().as_str()))
        .filter(|c| is_numeric_dtype(c.dtype()))
        .map(|c| c.name().to_string())
        .collect();

    let features: Vec<CalendarFeatures> = dates.iter().copied().map(CalendarFeatures::from).collect();

    let mut frame = frame;
    frame.with_column(Series::new(date_column.into(), dates.as_slice()))?;
    for column in feature_columns(&features) {
        frame.with_column(column)?;
    }
    let frame = frame.sort([date_column], SortMultipleOptions::default())?;

    debug!(
        "Derived calendar features for {} rows keyed by '{}' ({} measurement columns)",
        frame.height(),
        date_column,
        value_columns.len()
    );

    Ok(FeatureFrame::from_parts(frame, date_column, value_columns)?)
}

fn parse_date_column(frame: &DataFrame, date_column: &str) -> Result<Vec<NaiveDate>, FeatureError> {
    let column = frame
        .column(date_column)
        .map_err(|_| FeatureError::MissingDateColumn(date_column.to_string()))?;
    let raw = column.cast(&DataType::String)?;
    raw.str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .and_then(parse_yyyymmdd)
                .ok_or_else(|| FeatureError::Parse {
                    row,
                    value: value.unwrap_or("null").to_string(),
                })
        })
        .collect()
}

fn ensure_unique(dates: &[NaiveDate]) -> Result<(), FeatureError> {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable();
    match sorted.windows(2).find(|pair| pair[0] == pair[1]) {
        Some(pair) => Err(FeatureError::DuplicateTimestamp(pair[0])),
        None => Ok(()),
    }
}

fn feature_columns(features: &[CalendarFeatures]) -> [Series; 8] {
    let column = |name: &str, value: fn(&CalendarFeatures) -> i32| {
        Series::new(name.into(), features.iter().map(value).collect::<Vec<i32>>())
    };
    [
        column(COL_DAY_OF_WEEK, |f| f.day_of_week as i32),
        column(COL_MONTH, |f| f.month as i32),
        column(COL_YEAR, |f| f.year),
        column(COL_QUARTER, |f| f.quarter.number() as i32),
        column(COL_DAY_OF_YEAR, |f| f.day_of_year as i32),
        column(COL_DAY_OF_MONTH, |f| f.day_of_month as i32),
        column(COL_WEEK_OF_YEAR, |f| f.week_of_year as i32),
        column(COL_SEASON, |f| f.season.number() as i32),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_column(frame: &FeatureFrame, name: &str) -> Vec<i32> {
        frame
            .frame()
            .column(name)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap())
            .collect()
    }

    #[test]
    fn test_parse_yyyymmdd() {
        assert_eq!(parse_yyyymmdd("20200229"), NaiveDate::from_ymd_opt(2020, 2, 29));
        assert_eq!(parse_yyyymmdd("20190229"), None);
        assert_eq!(parse_yyyymmdd("2020-02-29"), None);
        assert_eq!(parse_yyyymmdd("2020021"), None);
        assert_eq!(parse_yyyymmdd("202002290"), None);
        assert_eq!(parse_yyyymmdd("+2020022"), None);
        assert_eq!(parse_yyyymmdd("20201301"), None);
    }

    #[test]
    fn test_derive_from_integer_dates() -> Result<(), Box<dyn std::error::Error>> {
        let raw = df!(
            "ID" => &[20201231i64, 20191231, 20200415],
            "prcp" => &[1.0, 2.0, 3.0],
        )?;
        let features = derive_features(raw, "ID")?;

        assert_eq!(features.frame().column("ID")?.dtype(), &DataType::Date);
        // Sorted by date
        assert_eq!(int_column(&features, COL_YEAR), vec![2019, 2020, 2020]);
        assert_eq!(int_column(&features, COL_DAY_OF_YEAR), vec![365, 106, 366]);
        assert_eq!(int_column(&features, COL_MONTH), vec![12, 4, 12]);
        assert_eq!(int_column(&features, COL_QUARTER), vec![4, 2, 4]);
        assert_eq!(int_column(&features, COL_SEASON), vec![1, 2, 1]);
        assert_eq!(int_column(&features, COL_DAY_OF_MONTH), vec![31, 15, 31]);
        assert_eq!(int_column(&features, COL_WEEK_OF_YEAR), vec![1, 16, 53]);
        // 2019-12-31 Tuesday, 2020-04-15 Wednesday, 2020-12-31 Thursday
        assert_eq!(int_column(&features, COL_DAY_OF_WEEK), vec![1, 2, 3]);

        let prcp: Vec<Option<f64>> = features.frame().column("prcp")?.f64()?.into_iter().collect();
        assert_eq!(prcp, vec![Some(2.0), Some(3.0), Some(1.0)]);
        Ok(())
    }

    #[test]
    fn test_derive_from_string_dates() -> Result<(), Box<dyn std::error::Error>> {
        let raw = df!(
            "date" => &["20210301", "20210302"],
            "tmax" => &[28.1, 27.4],
        )?;
        let features = derive_features(raw, "date")?;
        assert_eq!(features.value_columns(), ["tmax".to_string()]);
        for name in DERIVED_COLUMNS {
            assert_eq!(features.frame().column(name)?.dtype(), &DataType::Int32);
        }
        Ok(())
    }

    #[test]
    fn test_malformed_date_fails() -> Result<(), Box<dyn std::error::Error>> {
        let raw = df!(
            "ID" => &["20200101", "2020-01-02"],
            "prcp" => &[1.0, 2.0],
        )?;
        match derive_features(raw, "ID") {
            Err(FeatureError::Parse { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "2020-01-02");
            }
            other => panic!("expected parse error, got {:?}", other.map(|f| f.height())),
        }
        Ok(())
    }

    #[test]
    fn test_null_date_fails() -> Result<(), Box<dyn std::error::Error>> {
        let raw = df!(
            "ID" => &[Some(20200101i64), None],
            "prcp" => &[1.0, 2.0],
        )?;
        assert!(matches!(
            derive_features(raw, "ID"),
            Err(FeatureError::Parse { row: 1, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_missing_date_column() -> Result<(), Box<dyn std::error::Error>> {
        let raw = df!("prcp" => &[1.0, 2.0])?;
        assert!(matches!(
            derive_features(raw, "ID"),
            Err(FeatureError::MissingDateColumn(name)) if name == "ID"
        ));
        Ok(())
    }

    #[test]
    fn test_duplicate_timestamps_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let raw = df!(
            "ID" => &[20200101i64, 20200102, 20200101],
            "prcp" => &[1.0, 2.0, 3.0],
        )?;
        match derive_features(raw, "ID") {
            Err(FeatureError::DuplicateTimestamp(date)) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
            }
            other => panic!("expected duplicate error, got {:?}", other.map(|f| f.height())),
        }
        Ok(())
    }

    #[test]
    fn test_non_numeric_columns_are_not_measurements() -> Result<(), Box<dyn std::error::Error>> {
        let raw = df!(
            "ID" => &[20200101i64],
            "station" => &["Kibabii"],
            "st_1" => &[12i64],
            "st_2" => &[Some(3.5f64)],
        )?;
        let features = derive_features(raw, "ID")?;
        assert_eq!(features.value_columns(), ["st_1".to_string(), "st_2".to_string()]);
        Ok(())
    }
}
