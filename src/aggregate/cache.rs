use crate::aggregate::aggregator::aggregate;
use crate::aggregate::error::AggregateError;
use crate::frames::feature_frame::FeatureFrame;
use crate::types::aggregation::{AggregationRequest, AggregationResult, Grouping};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    fingerprint: u64,
    column: String,
    grouping: Grouping,
}

/// Memoizes aggregation results across repeated renders of the same view.
///
/// Entries are keyed by the frame's [`FeatureFrame::fingerprint`], the column
/// and the validated grouping, so a year or quarter passed along with a mode
/// that ignores them does not create a separate entry. Stored results are
/// shared and never modified. Failed aggregations are not stored.
#[derive(Debug, Default)]
pub struct AggregationCache {
    entries: HashMap<CacheKey, Arc<AggregationResult>>,
}

impl AggregationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for `(frame, request)`, computing and storing
    /// it on a miss.
    pub fn get_or_compute(
        &mut self,
        frame: &FeatureFrame,
        request: &AggregationRequest,
    ) -> Result<Arc<AggregationResult>, AggregateError> {
        let grouping = match request.grouping() {
            Ok(grouping) => grouping,
            // aggregate reports the column error first when both are wrong
            Err(_) => return aggregate(frame, request).map(Arc::new),
        };
        let key = CacheKey {
            fingerprint: frame.fingerprint(),
            column: request.column().to_string(),
            grouping,
        };

        if let Some(hit) = self.entries.get(&key) {
            debug!(
                "Cache hit for {} aggregation of '{}'",
                request.mode(),
                request.column()
            );
            return Ok(Arc::clone(hit));
        }

        debug!(
            "Cache miss for {} aggregation of '{}', computing",
            request.mode(),
            request.column()
        );
        let result = Arc::new(aggregate(frame, request)?);
        self.entries.insert(key, Arc::clone(&result));
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::derive::derive_features;
    use crate::types::aggregation::AggregationMode;
    use polars::prelude::*;

    fn frame(values: &[f64]) -> Result<FeatureFrame, Box<dyn std::error::Error>> {
        let ids: Vec<i64> = (1..=values.len() as i64).map(|d| 20200100 + d).collect();
        Ok(derive_features(df!("ID" => ids, "val" => values)?, "ID")?)
    }

    fn monthly() -> AggregationRequest {
        AggregationRequest::builder()
            .column("val")
            .mode(AggregationMode::Monthly)
            .build()
    }

    #[test]
    fn test_repeated_request_hits_cache() -> Result<(), Box<dyn std::error::Error>> {
        let frame = frame(&[1.0, 2.0, 3.0])?;
        let mut cache = AggregationCache::new();

        let first = cache.get_or_compute(&frame, &monthly())?;
        let second = cache.get_or_compute(&frame, &monthly())?;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        Ok(())
    }

    #[test]
    fn test_distinct_requests_and_frames_get_own_entries() -> Result<(), Box<dyn std::error::Error>> {
        let frame = frame(&[1.0, 2.0, 3.0])?;
        let other = frame_with_other_values()?;
        let mut cache = AggregationCache::new();

        let a = cache.get_or_compute(&frame, &monthly())?;
        let b = cache.get_or_compute(&other, &monthly())?;
        let seasonal = AggregationRequest::builder()
            .column("val")
            .mode(AggregationMode::Seasonal)
            .build();
        cache.get_or_compute(&frame, &seasonal)?;

        assert_eq!(cache.len(), 3);
        assert_eq!(a.get("January"), Some(2.0));
        assert_eq!(b.get("January"), Some(5.0));

        cache.clear();
        assert!(cache.is_empty());
        Ok(())
    }

    fn frame_with_other_values() -> Result<FeatureFrame, Box<dyn std::error::Error>> {
        frame(&[4.0, 5.0, 6.0])
    }

    #[test]
    fn test_unused_parameters_share_an_entry() -> Result<(), Box<dyn std::error::Error>> {
        let frame = frame(&[1.0, 2.0, 3.0])?;
        let mut cache = AggregationCache::new();

        let plain = cache.get_or_compute(&frame, &monthly())?;
        let with_year = AggregationRequest::builder()
            .column("val")
            .mode(AggregationMode::Monthly)
            .year(2020)
            .quarter(3)
            .build();
        let same = cache.get_or_compute(&frame, &with_year)?;
        assert!(Arc::ptr_eq(&plain, &same));
        assert_eq!(cache.len(), 1);

        let quarterly = |quarter: u32| {
            AggregationRequest::builder()
                .column("val")
                .mode(AggregationMode::Quarterly)
                .year(2020)
                .quarter(quarter)
                .build()
        };
        cache.get_or_compute(&frame, &quarterly(1))?;
        cache.get_or_compute(&frame, &quarterly(2))?;
        assert_eq!(cache.len(), 3);
        Ok(())
    }

    #[test]
    fn test_errors_are_not_cached() -> Result<(), Box<dyn std::error::Error>> {
        let frame = frame(&[1.0])?;
        let mut cache = AggregationCache::new();
        let bad = AggregationRequest::builder()
            .column("missing")
            .mode(AggregationMode::Yearly)
            .build();
        assert!(cache.get_or_compute(&frame, &bad).is_err());

        let unknown_and_incomplete = AggregationRequest::builder()
            .column("missing")
            .mode(AggregationMode::Quarterly)
            .build();
        assert!(matches!(
            cache.get_or_compute(&frame, &unknown_and_incomplete),
            Err(AggregateError::UnknownColumn(_))
        ));
        assert!(cache.is_empty());
        Ok(())
    }
}
