//! Daemon entry point for the mdhelp MCP server.
//!
//! Loads configuration from arguments and the environment, opens the
//! markdown directory, and serves the MCP protocol over stdio or streamable
//! HTTP. Logs go to stderr so they never mix with the stdio transport.

mod config;

use mdhelp_core::DocumentStore;
use mdhelp_mcp::MdHelpMcp;
use mdhelp_mcp::server::{serve_stdio, serve_streamable_http};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{MdHelpConfig, Transport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = MdHelpConfig::from_args()?;
    info!(
        root = %config.markdown_dir.display(),
        remind_mcp = config.reminders.remind_mcp,
        remind_organize = config.reminders.remind_organize,
        custom_reminders = config.reminders.custom_reminders.len(),
        "starting mdhelp"
    );

    let service = MdHelpMcp::new(DocumentStore::new(config.markdown_dir), config.reminders);
    match config.transport {
        Transport::Stdio => serve_stdio(service).await,
        Transport::Http(http_config) => serve_streamable_http(service, http_config).await,
    }
}
