//! Command implementations for the contribution calendar CLI.
//!
//! `serve` runs the HTTP API, `render` is the batch driver that writes the
//! calendar image to disk, and `summary` prints the merged series as JSON.

use cc_series::http::{HttpContributionSource, HttpSourceConfig, DEFAULT_URL_TEMPLATE};
use cc_series::DEFAULT_MAX_IDENTITIES;
use clap::{Args, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub mod render;
pub mod summary;

/// Upstream contribution API options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Upstream URL; `{identity}` is replaced by each identity
    #[arg(long, value_name = "URL", default_value = DEFAULT_URL_TEMPLATE)]
    pub source_url: String,

    /// Attempts per identity before giving up
    #[arg(long, default_value_t = 3)]
    pub max_tries: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

impl SourceArgs {
    pub fn config(&self) -> HttpSourceConfig {
        HttpSourceConfig {
            url_template: self.source_url.clone(),
            max_tries: self.max_tries,
            timeout: Duration::from_secs(self.timeout_secs),
            ..HttpSourceConfig::default()
        }
    }

    pub fn build(&self) -> anyhow::Result<HttpContributionSource> {
        Ok(HttpContributionSource::new(self.config())?)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the JSON API and the calendar image over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,

        /// Seconds a fetched series or summary stays fresh
        #[arg(long, default_value_t = 900)]
        cache_ttl_secs: u64,

        /// Largest accepted identity list
        #[arg(long, default_value_t = DEFAULT_MAX_IDENTITIES)]
        max_identities: usize,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Fetch, merge and write the calendar SVG to a file
    Render {
        /// Comma separated identities
        #[arg(short, long, value_name = "A,B,...")]
        users: String,

        /// Output path for the SVG
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Leave out the Less/More legend
        #[arg(long)]
        no_legend: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the merged series and totals as JSON
    Summary {
        /// Comma separated identities
        #[arg(short, long, value_name = "A,B,...")]
        users: String,

        /// Also write `date,count` rows to this CSV file
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve {
            bind,
            cache_ttl_secs,
            max_identities,
            source,
        } => {
            let config = cc_server::ServerConfig {
                bind,
                cache_ttl: Duration::from_secs(cache_ttl_secs),
                max_identities,
                source: source.config(),
                ..cc_server::ServerConfig::default()
            };
            cc_server::serve(config).await
        }
        Command::Render {
            users,
            output,
            no_legend,
            source,
        } => render::run_render(&source.build()?, &users, &output, !no_legend).await,
        Command::Summary { users, csv, source } => {
            summary::run_summary(&source.build()?, &users, csv.as_deref()).await
        }
    }
}
