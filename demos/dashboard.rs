//! demos/dashboard.rs
//!
//! Loads one observation table and prints what the dashboard shows for a
//! column: the summary table followed by the yearly, monthly, seasonal and
//! quarterly averages.
//!
//! To run this example:
//! cargo run --example dashboard -- <file.csv> <column> [year] [quarter]

use climate_dash::{AggregationCache, AggregationMode, AggregationRequest, ClimateError, DatasetLoader};
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), ClimateError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let [path, column, rest @ ..] = args.as_slice() else {
        eprintln!("usage: dashboard <file.csv> <column> [year] [quarter]");
        std::process::exit(2);
    };
    let path = PathBuf::from(path);
    let selected_year: Option<i32> = rest.first().and_then(|y| y.parse().ok());
    let quarter: u32 = rest.get(1).and_then(|q| q.parse().ok()).unwrap_or(1);

    // 1. Load the table and derive calendar features
    let loader = DatasetLoader::builder()
        .data_dir(path.parent().map(PathBuf::from).unwrap_or_default())
        .build();
    let frame = loader.load_path(&path)?;

    // 2. Summary table
    println!("{:<12} {:>6} {:>9} {:>9} {:>9} {:>9}", "column", "count", "mean", "std", "min", "max");
    for summary in frame.describe()? {
        println!(
            "{:<12} {:>6} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
            summary.column, summary.count, summary.mean, summary.std, summary.min, summary.max
        );
    }

    // 3. Every aggregation mode; quarterly defaults to the latest year
    let years = frame.years().map_err(climate_dash::FeatureError::from)?;
    let year = selected_year.or_else(|| years.last().copied());

    let mut cache = AggregationCache::new();
    for mode in AggregationMode::ALL {
        let request = AggregationRequest::builder()
            .column(column.as_str())
            .mode(mode)
            .maybe_year(year)
            .quarter(quarter)
            .build();
        let result = cache.get_or_compute(&frame, &request)?;
        println!("\n{}", result.title);
        for point in result.iter() {
            println!("  {:<12} {:>9.2}", point.label, point.value);
        }
    }

    Ok(())
}
