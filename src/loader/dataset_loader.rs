use crate::features::derive::derive_features;
use crate::frames::feature_frame::FeatureFrame;
use crate::loader::error::LoadError;
use crate::types::dataset_kind::DatasetKind;
use bon::Builder;
use log::{info, warn};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Column holding the `YYYYMMDD` date in the source tables.
pub const DEFAULT_DATE_COLUMN: &str = "ID";

/// Cell contents read as a missing value in any column.
const MISSING_VALUE_TOKENS: [&str; 20] = [
    "", "#N/A", "#N/A N/A", "#NA", "-", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Reads the observation tables from CSV files and derives their calendar features.
///
/// # Examples
///
/// ```no_run
/// use climate_dash::{DatasetKind, DatasetLoader};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let loader = DatasetLoader::builder().data_dir("data").build();
/// let rainfall = loader.load(DatasetKind::Rainfall)?;
/// println!("{} days of rainfall", rainfall.height());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Builder)]
pub struct DatasetLoader {
    /// Directory containing the files named by [`DatasetKind::file_name`].
    #[builder(into)]
    data_dir: PathBuf,
    #[builder(into, default = String::from(DEFAULT_DATE_COLUMN))]
    date_column: String,
}

impl DatasetLoader {
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads one of the three tables from the data directory.
    pub fn load(&self, kind: DatasetKind) -> Result<FeatureFrame, LoadError> {
        let path = self.data_dir.join(kind.file_name());
        info!("Loading {} from {}", kind, path.display());
        self.load_path(&path)
    }

    /// Loads any CSV file with a header row and a `YYYYMMDD` date column.
    pub fn load_path(&self, path: &Path) -> Result<FeatureFrame, LoadError> {
        if !path.is_file() {
            warn!("Dataset file {} not found", path.display());
            return Err(LoadError::FileNotFound(path.to_path_buf()));
        }

        let null_values = NullValues::AllColumns(
            MISSING_VALUE_TOKENS.iter().map(|token| (*token).into()).collect(),
        );
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .map_parse_options(|options| options.with_null_values(Some(null_values.clone())))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .and_then(|frame| measurements_as_float(frame, &self.date_column))
            .map_err(|e| LoadError::CsvRead(path.to_path_buf(), e))?;

        let features = derive_features(frame, &self.date_column)?;
        info!(
            "Loaded {} rows with {} measurement columns from {}",
            features.height(),
            features.value_columns().len(),
            path.display()
        );
        Ok(features)
    }
}

/// Casts every column but the date to `Float64`. Cells that are not numbers
/// become null, so an empty or all-missing column stays a measurement column.
fn measurements_as_float(frame: DataFrame, date_column: &str) -> PolarsResult<DataFrame> {
    let columns = frame
        .get_columns()
        .iter()
        .map(|column| {
            if column.name().as_str() == date_column {
                Ok(column.clone())
            } else {
                column.cast(&DataType::Float64)
            }
        })
        .collect::<PolarsResult<Vec<Column>>>()?;
    DataFrame::new(columns)
}
