//! The upstream data-source seam and the fan-out/fan-in fetch built on it.

use crate::{
    error::{AggregateError, SourceError},
    merge::merge,
    series::DailySeries,
    summary::{summarize, Summary},
};
use async_trait::async_trait;
use futures::future::try_join_all;
use log::{info, warn};

/// Anything that can produce one identity's per-day contribution counts.
#[async_trait]
pub trait ContributionSource: Send + Sync {
    async fn fetch(&self, identity: &str) -> Result<DailySeries, SourceError>;
}

/// Fetch every identity concurrently and wait for all of them.
///
/// Results come back in the order of `identities`. The first failure
/// abandons the remaining fetches and fails the whole call; there is no
/// partial result.
pub async fn fetch_all<S>(
    source: &S,
    identities: &[String],
) -> Result<Vec<DailySeries>, AggregateError>
where
    S: ContributionSource + ?Sized,
{
    try_join_all(identities.iter().map(|identity| async move {
        source.fetch(identity).await.map_err(|reason| {
            warn!("Fetching contributions for {} failed: {}", identity, reason);
            AggregateError::UpstreamFailure {
                identity: identity.clone(),
                reason,
            }
        })
    }))
    .await
}

/// Fetch, merge and summarize the combined contributions of `identities`.
pub async fn aggregate<S>(source: &S, identities: &[String]) -> Result<Summary, AggregateError>
where
    S: ContributionSource + ?Sized,
{
    let series = fetch_all(source, identities).await?;
    let summary = summarize(&merge(&series));
    info!(
        "Aggregated {} identities: {} days, {} contributions",
        identities.len(),
        summary.counts.len(),
        summary.total
    );
    Ok(summary)
}
