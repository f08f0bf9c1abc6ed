use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Date column '{0}' not found in DataFrame")]
    MissingDateColumn(String),

    // Every timestamp must be exactly eight digits, YYYYMMDD
    #[error("Row {row}: '{value}' is not a valid YYYYMMDD date")]
    Parse { row: usize, value: String },

    #[error("Timestamp {0} occurs more than once")]
    DuplicateTimestamp(NaiveDate),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
