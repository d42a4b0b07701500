//! cc-cli - combine contribution calendars from several identities.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cc-cli",
    version,
    about = "Combined contribution calendar toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cc_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::debug!("Starting {}", env!("CARGO_PKG_NAME"));
    cc_cmd::run(cli.command).await
}
