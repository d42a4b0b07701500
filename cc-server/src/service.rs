//! Cached aggregation shared by every request handler.

use crate::cache::TtlCache;
use async_trait::async_trait;
use cc_series::{
    aggregate, parse_identities, request_key, AggregateError, ContributionSource, DailySeries,
    SourceError, Summary,
};
use log::debug;
use std::sync::Arc;
use std::time::Duration;

/// Fetches and merges contributions, caching both per-identity series and
/// per-request summaries for one staleness window.
pub struct ContributionService {
    source: Arc<dyn ContributionSource>,
    series_cache: TtlCache<DailySeries>,
    summary_cache: TtlCache<Summary>,
    max_identities: usize,
}

impl ContributionService {
    pub fn new(source: Arc<dyn ContributionSource>, ttl: Duration, max_identities: usize) -> Self {
        Self {
            source,
            series_cache: TtlCache::new(ttl),
            summary_cache: TtlCache::new(ttl),
            max_identities,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.summary_cache.ttl()
    }

    /// Validate `raw` and return the combined summary of its identities.
    pub async fn summary(&self, raw_identities: &str) -> Result<Summary, AggregateError> {
        let identities = parse_identities(raw_identities, self.max_identities)?;
        let key = request_key(&identities);
        if let Some(summary) = self.summary_cache.get(&key) {
            debug!("Summary cache hit for {}", key);
            return Ok(summary);
        }
        debug!("Summary cache miss for {}", key);
        let summary = aggregate(self, &identities).await?;
        self.summary_cache.put(key, summary.clone());
        Ok(summary)
    }
}

/// The service is itself a source: cached series first, upstream otherwise.
#[async_trait]
impl ContributionSource for ContributionService {
    async fn fetch(&self, identity: &str) -> Result<DailySeries, SourceError> {
        if let Some(series) = self.series_cache.get(identity) {
            debug!("Series cache hit for {}", identity);
            return Ok(series);
        }
        let series = self.source.fetch(identity).await?;
        self.series_cache.put(identity, series.clone());
        Ok(series)
    }
}
