use polars::error::PolarsError;
use polars::prelude::DataType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Column '{0}' is not a numeric attribute of the series")]
    UnknownColumn(String),

    #[error("Column '{column}' has non-numeric type {dtype}")]
    NonNumericColumn { column: String, dtype: DataType },

    #[error("Invalid aggregation parameter: {0}")]
    InvalidModeParameter(String),

    #[error("Unknown aggregation mode '{0}'")]
    UnknownMode(String),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
