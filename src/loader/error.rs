use crate::features::error::FeatureError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Dataset file '{0}' does not exist")]
    FileNotFound(PathBuf),

    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error(transparent)]
    Feature(#[from] FeatureError),
}
