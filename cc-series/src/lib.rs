//! Daily contribution series for one or more identities.
//!
//! Fetch each identity's series through a [`source::ContributionSource`],
//! combine them with [`merge::merge`] and derive a [`summary::Summary`].
//! The HTTP client lives behind the `api` feature so the pure pipeline can
//! be used without a network stack.

pub mod error;
pub mod identity;
pub mod merge;
pub mod series;
pub mod source;
pub mod summary;

#[cfg(feature = "api")]
pub mod http;

pub use error::{AggregateError, SourceError};
pub use identity::{parse_identities, request_key, DEFAULT_MAX_IDENTITIES};
pub use merge::merge;
pub use series::DailySeries;
pub use source::{aggregate, fetch_all, ContributionSource};
pub use summary::{summarize, Summary};
