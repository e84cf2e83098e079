use std::sync::Arc;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::info;

use zephyr_mcp::client::HttpExecutor;
use zephyr_mcp::config::{API_KEY_ENV, BASE_URL_ENV, Config};
use zephyr_mcp::logging::init_tracing;
use zephyr_mcp::mcp::{ZephyrServer, serve_stdio};

#[derive(Parser)]
#[command(name = "zephyr-mcp")]
#[command(author, version, about = "Zephyr Scale MCP server over stdio", long_about = None)]
struct Cli {
    /// Zephyr Scale API token
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: String,

    /// Zephyr Scale API base URL, e.g. https://api.zephyrscale.smartbear.com/v2
    #[arg(long, env = BASE_URL_ENV)]
    base_url: String,

    /// Log filter directive (RUST_LOG takes precedence)
    #[arg(long, env = "ZEPHYR_MCP_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| miette::miette!("Failed to install rustls crypto provider"))?;

    init_tracing(&cli.log_level);

    let config = Config::new(cli.api_key, &cli.base_url)?;
    info!(base_url = %config.base_url(), "Starting Zephyr MCP server");

    let server = ZephyrServer::new(Arc::new(HttpExecutor::new(config)));
    serve_stdio(server).await.into_diagnostic()?;

    info!("Zephyr MCP server stopped");
    Ok(())
}
