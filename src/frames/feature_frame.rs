//! Contains the `FeatureFrame` structure, a dated observation table carrying
//! derived calendar attributes.

use crate::aggregate::aggregator::aggregate;
use crate::aggregate::error::AggregateError;
use crate::features::derive::COL_YEAR;
use crate::summary::ColumnSummary;
use crate::types::aggregation::{AggregationMode, AggregationRequest, AggregationResult};
use crate::utils::{float_values, is_numeric_dtype};
use bon::bon;
use ordered_float::OrderedFloat;
use polars::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// A wrapper around a Polars `DataFrame` holding an observation series whose
/// rows carry the calendar attributes produced by [`crate::derive_features`].
///
/// Rows are sorted by the date column and every date occurs once. The frame is
/// never modified in place.
///
/// Instances are obtained from [`crate::derive_features`] or
/// [`crate::DatasetLoader`].
#[derive(Clone)]
pub struct FeatureFrame {
    frame: DataFrame,
    date_column: String,
    value_columns: Vec<String>,
    fingerprint: u64,
}

impl FeatureFrame {
    pub(crate) fn from_parts(
        frame: DataFrame,
        date_column: &str,
        value_columns: Vec<String>,
    ) -> PolarsResult<Self> {
        let fingerprint = fingerprint_of(&frame, date_column, &value_columns)?;
        Ok(Self {
            frame,
            date_column: date_column.to_string(),
            value_columns,
            fingerprint,
        })
    }

    /// The underlying data, including the date key and derived columns.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_inner(self) -> DataFrame {
        self.frame
    }

    /// Name of the date column the rows are keyed and sorted by.
    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    /// The numeric measurement columns of the source table, in source order.
    /// Derived calendar columns are not included.
    pub fn value_columns(&self) -> &[String] {
        &self.value_columns
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Content hash over the dates and every measurement value.
    ///
    /// Two frames with equal dates and equal measurements share a fingerprint,
    /// which makes it usable as a cache key.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// The distinct years present in the series, ascending.
    ///
    /// These are the years a caller can offer for quarterly aggregation.
    pub fn years(&self) -> PolarsResult<Vec<i32>> {
        let years: BTreeSet<i32> = self
            .frame
            .column(COL_YEAR)?
            .i32()?
            .into_iter()
            .flatten()
            .collect();
        Ok(years.into_iter().collect())
    }

    /// Reads `column` as the `f64` input of a mean, with `NaN` mapped to null.
    ///
    /// The date key is not a valid column. Derived calendar columns are.
    pub(crate) fn numeric_values(&self, column: &str) -> Result<Vec<Option<f64>>, AggregateError> {
        if column == self.date_column {
            return Err(AggregateError::UnknownColumn(column.to_string()));
        }
        let values = self
            .frame
            .column(column)
            .map_err(|_| AggregateError::UnknownColumn(column.to_string()))?;
        if !is_numeric_dtype(values.dtype()) {
            return Err(AggregateError::NonNumericColumn {
                column: column.to_string(),
                dtype: values.dtype().clone(),
            });
        }
        Ok(float_values(values)?)
    }

    /// Descriptive statistics for every measurement column.
    pub fn describe(&self) -> Result<Vec<ColumnSummary>, AggregateError> {
        self.value_columns
            .iter()
            .map(|name| {
                let values = self.numeric_values(name)?;
                Ok(ColumnSummary::from_values(name, values)?)
            })
            .collect()
    }
}

#[bon]
impl FeatureFrame {
    #[builder(start_fn(
        name = aggregate,
        doc {
            /// Computes the mean of `column` per calendar group.
            ///
            /// This method uses a builder pattern: set the `mode`, plus `year` and
            /// `quarter` for [`AggregationMode::Quarterly`], then `.call()`.
            ///
            /// # Errors
            ///
            /// * [`AggregateError::UnknownColumn`] if `column` is not a numeric column of the frame.
            /// * [`AggregateError::InvalidModeParameter`] for quarterly mode without a year
            ///   and a quarter in 1..=4.
            ///
            /// # Example
            ///
            /// ```
            /// use climate_dash::{derive_features, AggregationMode};
            /// use polars::prelude::*;
            ///
            /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
            /// let features = derive_features(
            ///     df!("ID" => &[20200101i64, 20200102], "prcp" => &[10.0, 20.0])?,
            ///     "ID",
            /// )?;
            /// let monthly = features
            ///     .aggregate("prcp")
            ///     .mode(AggregationMode::Monthly)
            ///     .call()?;
            /// assert_eq!(monthly.get("January"), Some(15.0));
            /// # Ok(())
            /// # }
            /// ```
        }
    ))]
    #[doc(hidden)]
    pub fn build_aggregate(
        &self,
        #[builder(start_fn)] column: &str,
        mode: AggregationMode,
        year: Option<i32>,
        quarter: Option<u32>,
    ) -> Result<AggregationResult, AggregateError> {
        let request = AggregationRequest::builder()
            .column(column)
            .mode(mode)
            .maybe_year(year)
            .maybe_quarter(quarter)
            .build();
        aggregate(self, &request)
    }
}

fn fingerprint_of(
    frame: &DataFrame,
    date_column: &str,
    value_columns: &[String],
) -> PolarsResult<u64> {
    let mut hasher = DefaultHasher::new();
    let days = frame.column(date_column)?.cast(&DataType::Int32)?;
    for day in days.i32()?.into_iter() {
        day.hash(&mut hasher);
    }
    for name in value_columns {
        name.hash(&mut hasher);
        for value in float_values(frame.column(name)?)? {
            value.map(OrderedFloat).hash(&mut hasher);
        }
    }
    Ok(hasher.finish())
}
