//! Defines the three source tables the dashboard reads.

use std::fmt;

/// The observation tables available to the dashboard.
///
/// Each table has a fixed CSV file name inside the data directory and a page
/// title shown above its charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Daily rainfall in millimetres.
    Rainfall,
    /// Daily maximum temperature in degrees Celsius.
    TemperatureMax,
    /// Daily minimum temperature in degrees Celsius.
    TemperatureMin,
}

impl DatasetKind {
    /// All tables in navigation order.
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Rainfall,
        DatasetKind::TemperatureMax,
        DatasetKind::TemperatureMin,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            DatasetKind::Rainfall => "Rainfall.csv",
            DatasetKind::TemperatureMax => "Tmax.csv",
            DatasetKind::TemperatureMin => "Tmin.csv",
        }
    }

    /// Page title, including the unit of measurement.
    pub fn title(&self) -> &'static str {
        match self {
            DatasetKind::Rainfall => "Rainfall Data in mm",
            DatasetKind::TemperatureMax => "Temperature Max Data (\u{2103})",
            DatasetKind::TemperatureMin => "Temperature Min Data (\u{2103})",
        }
    }
}

/// Formats a `DatasetKind` as its navigation label.
///
/// # Examples
///
/// ```
/// use climate_dash::DatasetKind;
///
/// assert_eq!(DatasetKind::TemperatureMax.to_string(), "Temperature Max Data");
/// ```
impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DatasetKind::Rainfall => "Rainfall Data",
            DatasetKind::TemperatureMax => "Temperature Max Data",
            DatasetKind::TemperatureMin => "Temperature Min Data",
        };
        f.write_str(label)
    }
}
