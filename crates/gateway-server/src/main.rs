//! UDP gateway binary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gateway_server::config::Config;
use gateway_server::server;

#[derive(Parser)]
#[clap(name = "gateway-server")]
#[clap(about = "FIX-lite trading gateway over UDP")]
struct Cli {
    /// TOML configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// UDP port to listen on
    #[clap(short, long)]
    port: Option<u16>,

    /// Interface to bind
    #[clap(short, long)]
    bind: Option<String>,

    /// Send every reply to this address instead of the sender
    #[clap(short, long)]
    reply_to: Option<String>,

    /// Log filter used when RUST_LOG is not set (e.g. "debug")
    #[clap(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(cli.bind, cli.port, cli.reply_to, cli.log_level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        addr = %config.transport.socket_addr_string(),
        sender_comp_id = %config.gateway.sender_comp_id,
        spread_threshold = %config.gateway.quote.spread_threshold,
        "starting gateway-server"
    );

    server::run(config).await
}
