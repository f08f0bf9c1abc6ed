use crate::aggregate::error::AggregateError;
use crate::features::error::FeatureError;
use crate::loader::error::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Load(#[from] LoadError),
}
