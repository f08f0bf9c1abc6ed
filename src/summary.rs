//! Descriptive statistics per measurement column, the table shown above the
//! charts of every dataset page.

use polars::prelude::*;
use serde::Serialize;

const VALUES: &str = "values";

/// Count, mean, spread and quartiles of one column, ignoring null and `NaN`.
///
/// `std` is the sample standard deviation (n - 1 denominator). Quartiles use
/// linear interpolation between the closest ranks. Statistics that cannot be
/// computed from the available values are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub q25: f64,
    #[serde(rename = "50%")]
    pub median: f64,
    #[serde(rename = "75%")]
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    pub fn from_values(
        column: &str,
        values: impl IntoIterator<Item = Option<f64>>,
    ) -> PolarsResult<Self> {
        let present: Vec<Option<f64>> = values
            .into_iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect();
        let data = DataFrame::new(vec![Series::new(VALUES.into(), present).into()])?;

        let quartile = |q: f64| col(VALUES).quantile(lit(q), QuantileMethod::Linear);
        let stats = data
            .lazy()
            .select([
                col(VALUES).count().alias("count"),
                col(VALUES).mean().alias("mean"),
                col(VALUES).std(1).alias("std"),
                col(VALUES).min().alias("min"),
                quartile(0.25).alias("25%"),
                quartile(0.5).alias("50%"),
                quartile(0.75).alias("75%"),
                col(VALUES).max().alias("max"),
            ])
            .collect()?;

        let stat = |name: &str| -> PolarsResult<f64> {
            Ok(stats
                .column(name)?
                .cast(&DataType::Float64)?
                .f64()?
                .get(0)
                .unwrap_or(f64::NAN))
        };

        Ok(ColumnSummary {
            column: column.to_string(),
            count: stat("count")? as usize,
            mean: stat("mean")?,
            std: stat("std")?,
            min: stat("min")?,
            q25: stat("25%")?,
            median: stat("50%")?,
            q75: stat("75%")?,
            max: stat("max")?,
        })
    }
}
