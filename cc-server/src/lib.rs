//! HTTP surface for combined contribution calendars.
//!
//! Routes:
//! - `GET /api/contributions?users=a,b` - merged series and totals as JSON
//! - `GET /api/calendar.svg?users=a,b` - the calendar heatmap image
//! - `GET /api/calendar.json?users=a,b` - the calendar geometry as JSON
//! - `GET /healthz`

pub mod cache;
pub mod handlers;
pub mod service;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use cc_calendar::{Geometry, Palette};
use cc_series::http::{HttpContributionSource, HttpSourceConfig};
use cc_series::{ContributionSource, DEFAULT_MAX_IDENTITIES};
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

pub use service::ContributionService;

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub cache_ttl: Duration,
    pub max_identities: usize,
    pub source: HttpSourceConfig,
    pub geometry: Geometry,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cache_ttl: Duration::from_secs(15 * 60),
            max_identities: DEFAULT_MAX_IDENTITIES,
            source: HttpSourceConfig::default(),
            geometry: Geometry::default(),
        }
    }
}

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ContributionService>,
    pub geometry: Geometry,
    pub palette: Arc<Palette>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn ContributionSource>,
        cache_ttl: Duration,
        max_identities: usize,
        geometry: Geometry,
    ) -> Self {
        Self {
            service: Arc::new(ContributionService::new(source, cache_ttl, max_identities)),
            geometry,
            palette: Arc::new(Palette::default()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/api/contributions", get(handlers::contributions))
        .route("/api/calendar.svg", get(handlers::calendar_svg))
        .route("/api/calendar.json", get(handlers::calendar_json))
        .with_state(state)
}

/// Bind `config.bind` and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let source = HttpContributionSource::new(config.source.clone())
        .context("building the upstream HTTP client")?;
    let state = AppState::new(
        Arc::new(source),
        config.cache_ttl,
        config.max_identities,
        config.geometry,
    );
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    info!(
        "Listening on {} (upstream {}, cache ttl {}s, max {} identities)",
        listener.local_addr()?,
        config.source.url_template,
        config.cache_ttl.as_secs(),
        config.max_identities
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
