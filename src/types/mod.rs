pub mod aggregation;
pub mod calendar;
pub mod dataset_kind;
pub mod quarter;
pub mod season;
