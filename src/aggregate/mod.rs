pub mod aggregator;
pub mod cache;
pub mod error;
