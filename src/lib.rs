//! Calendar feature derivation and grouped averages for daily climate series.
//!
//! A dated observation table (rainfall, maximum or minimum temperature) is
//! decorated with calendar attributes by [`derive_features`], then reduced to
//! a labeled series of means by [`aggregate`] in one of four
//! [`AggregationMode`]s. The resulting [`AggregationResult`] is what a chart
//! renderer consumes.
//!
//! ```
//! use climate_dash::{derive_features, AggregationMode};
//! use polars::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let raw = df!(
//!     "ID" => &[20200101i64, 20200102, 20200103],
//!     "rainfall" => &[10.0, 20.0, 30.0],
//! )?;
//! let features = derive_features(raw, "ID")?;
//! let seasonal = features
//!     .aggregate("rainfall")
//!     .mode(AggregationMode::Seasonal)
//!     .call()?;
//! assert_eq!(seasonal.get("Hot and Dry"), Some(20.0));
//! assert_eq!(seasonal.len(), 4);
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod error;
mod features;
mod frames;
mod loader;
mod summary;
mod types;
mod utils;

pub use error::ClimateError;

pub use aggregate::aggregator::aggregate;
pub use aggregate::cache::AggregationCache;
pub use aggregate::error::AggregateError;

pub use features::derive::*;
pub use features::error::FeatureError;

pub use frames::feature_frame::FeatureFrame;

pub use loader::dataset_loader::{DatasetLoader, DEFAULT_DATE_COLUMN};
pub use loader::error::LoadError;

pub use summary::ColumnSummary;

pub use types::aggregation::{AggregatePoint, AggregationMode, AggregationRequest, AggregationResult};
pub use types::calendar::{month_abbreviation, month_name, CalendarFeatures, MONTHS};
pub use types::dataset_kind::DatasetKind;
pub use types::quarter::Quarter;
pub use types::season::Season;
