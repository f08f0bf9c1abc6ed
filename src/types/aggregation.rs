//! Types describing an aggregation request and the labeled series it produces.

use crate::aggregate::error::AggregateError;
use crate::types::quarter::Quarter;
use bon::Builder;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The calendar dimension an aggregation groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AggregationMode {
    /// One group per year present in the series, ascending.
    Yearly,
    /// One group per calendar month across all years, January through December.
    Monthly,
    /// One group per [`crate::Season`], in season-number order.
    Seasonal,
    /// One group per month of a selected quarter, restricted to a selected year.
    Quarterly,
}

impl AggregationMode {
    pub const ALL: [AggregationMode; 4] = [
        AggregationMode::Yearly,
        AggregationMode::Monthly,
        AggregationMode::Seasonal,
        AggregationMode::Quarterly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AggregationMode::Yearly => "Yearly",
            AggregationMode::Monthly => "Monthly",
            AggregationMode::Seasonal => "Seasonal",
            AggregationMode::Quarterly => "Quarterly",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggregationMode {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AggregationMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AggregateError::UnknownMode(s.to_string()))
    }
}

/// Everything a caller supplies to drive one aggregation.
///
/// `year` and `quarter` are only consulted for [`AggregationMode::Quarterly`],
/// which requires both.
///
/// # Examples
///
/// ```
/// use climate_dash::{AggregationMode, AggregationRequest};
///
/// let request = AggregationRequest::builder()
///     .column("rainfall")
///     .mode(AggregationMode::Quarterly)
///     .year(2020)
///     .quarter(2)
///     .build();
/// assert_eq!(request.column(), "rainfall");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Builder)]
pub struct AggregationRequest {
    #[builder(into)]
    column: String,
    mode: AggregationMode,
    year: Option<i32>,
    quarter: Option<u32>,
}

/// A validated request: the grouping key plus the filter it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Grouping {
    Yearly,
    Monthly,
    Seasonal,
    Quarterly { year: i32, quarter: Quarter },
}

impl AggregationRequest {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn quarter(&self) -> Option<u32> {
        self.quarter
    }

    /// Checks the mode parameters and resolves the grouping to apply.
    pub(crate) fn grouping(&self) -> Result<Grouping, AggregateError> {
        match self.mode {
            AggregationMode::Yearly => Ok(Grouping::Yearly),
            AggregationMode::Monthly => Ok(Grouping::Monthly),
            AggregationMode::Seasonal => Ok(Grouping::Seasonal),
            AggregationMode::Quarterly => {
                let year = self.year.ok_or_else(|| {
                    AggregateError::InvalidModeParameter(
                        "quarterly aggregation requires a year".to_string(),
                    )
                })?;
                let quarter = self.quarter.ok_or_else(|| {
                    AggregateError::InvalidModeParameter(
                        "quarterly aggregation requires a quarter".to_string(),
                    )
                })?;
                let quarter = Quarter::try_from(quarter).map_err(|q| {
                    AggregateError::InvalidModeParameter(format!(
                        "quarter must be between 1 and 4, got {}",
                        q
                    ))
                })?;
                Ok(Grouping::Quarterly { year, quarter })
            }
        }
    }
}

impl Grouping {
    pub(crate) fn title(&self, column: &str) -> String {
        match self {
            Grouping::Yearly => format!("Yearly Average {}", column),
            Grouping::Monthly => format!("Monthly Average {}", column),
            Grouping::Seasonal => format!("Seasonal Average {}", column),
            Grouping::Quarterly { year, quarter } => {
                format!("Quarterly Average {} - {} {}", column, quarter, year)
            }
        }
    }
}

/// One labeled value of an [`AggregationResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatePoint {
    pub label: String,
    /// Mean of the group, `NaN` when the group holds no values.
    pub value: f64,
}

/// The ordered `(label, value)` series produced by an aggregation, together
/// with a title describing it. This is what a chart renderer consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub title: String,
    pub points: Vec<AggregatePoint>,
}

impl AggregationResult {
    pub fn new(title: String, points: Vec<AggregatePoint>) -> Self {
        Self { title, points }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Value for a label, if the label is part of the series.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AggregatePoint> {
        self.points.iter()
    }

    /// Serializes the series for a renderer. Missing means become `null`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
