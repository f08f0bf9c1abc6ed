//! Grouped means over a [`FeatureFrame`], one of four calendar groupings.

use crate::aggregate::error::AggregateError;
use crate::features::derive::{COL_MONTH, COL_QUARTER, COL_SEASON, COL_YEAR};
use crate::frames::feature_frame::FeatureFrame;
use crate::types::aggregation::{AggregatePoint, AggregationRequest, AggregationResult, Grouping};
use crate::types::calendar::{month_abbreviation, month_name, MONTHS};
use crate::types::season::Season;
use log::debug;
use polars::prelude::*;
use std::collections::HashMap;

// Scratch columns, never visible outside this module.
const GROUP_INPUT: &str = "__group_input";
const GROUP_MEAN: &str = "__group_mean";

/// Computes the mean of `request.column` per group of the requested mode.
///
/// Null and `NaN` values are ignored. A group without any value reports
/// `NaN` instead of being dropped, so the fixed label sets of the monthly
/// (12), seasonal (4) and quarterly (3) modes are always complete. Labels are
/// matched to group means by key, never by position.
///
/// # Errors
///
/// * [`AggregateError::UnknownColumn`] / [`AggregateError::NonNumericColumn`]
///   before any grouping work is done.
/// * [`AggregateError::InvalidModeParameter`] for an incomplete quarterly request.
pub fn aggregate(
    frame: &FeatureFrame,
    request: &AggregationRequest,
) -> Result<AggregationResult, AggregateError> {
    let values = frame.numeric_values(request.column())?;
    let grouping = request.grouping()?;

    let means = group_means(frame, values, grouping)?;
    let mean_of = |key: i32| means.get(&key).copied().unwrap_or(f64::NAN);

    let points: Vec<AggregatePoint> = match grouping {
        Grouping::Yearly => frame
            .years()?
            .into_iter()
            .map(|year| point(year.to_string(), mean_of(year)))
            .collect(),
        Grouping::Monthly => MONTHS
            .iter()
            .map(|&month| {
                point(
                    month_name(month).to_string(),
                    mean_of(month.number_from_month() as i32),
                )
            })
            .collect(),
        Grouping::Seasonal => Season::ALL
            .iter()
            .map(|&season| point(season.name().to_string(), mean_of(season.number() as i32)))
            .collect(),
        Grouping::Quarterly { quarter, .. } => quarter
            .months()
            .iter()
            .map(|&month| {
                point(
                    month_abbreviation(month).to_string(),
                    mean_of(month.number_from_month() as i32),
                )
            })
            .collect(),
    };

    debug!(
        "Aggregated '{}' {} into {} groups ({} with data)",
        request.column(),
        request.mode(),
        points.len(),
        points.iter().filter(|p| !p.value.is_nan()).count()
    );

    Ok(AggregationResult::new(grouping.title(request.column()), points))
}

fn point(label: String, value: f64) -> AggregatePoint {
    AggregatePoint { label, value }
}

impl Grouping {
    fn key_column(&self) -> &'static str {
        match self {
            Grouping::Yearly => COL_YEAR,
            Grouping::Monthly => COL_MONTH,
            Grouping::Seasonal => COL_SEASON,
            Grouping::Quarterly { .. } => COL_MONTH,
        }
    }
}

/// Runs the group-by and returns the mean per key value. Keys of groups whose
/// values are all missing map to `NaN`.
fn group_means(
    frame: &FeatureFrame,
    values: Vec<Option<f64>>,
    grouping: Grouping,
) -> Result<HashMap<i32, f64>, AggregateError> {
    let mut data = frame.frame().clone();
    data.with_column(Series::new(GROUP_INPUT.into(), values))?;

    let mut lazy = data.lazy();
    if let Grouping::Quarterly { year, quarter } = grouping {
        lazy = lazy.filter(
            col(COL_YEAR)
                .eq(lit(year))
                .and(col(COL_QUARTER).eq(lit(quarter.number() as i32))),
        );
    }

    let key = grouping.key_column();
    let grouped = lazy
        .group_by([col(key)])
        .agg([col(GROUP_INPUT).mean().alias(GROUP_MEAN)])
        .collect()?;

    let keys = grouped.column(key)?.i32()?;
    let means = grouped.column(GROUP_MEAN)?.f64()?;
    Ok(keys
        .into_iter()
        .zip(means.into_iter())
        .filter_map(|(key, mean)| Some((key?, mean.unwrap_or(f64::NAN))))
        .collect())
}
