use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, builder::BoolishValueParser};
use mdhelp_core::ReminderConfig;
use mdhelp_mcp::server::{
    DEFAULT_MCP_HTTP_ADDR,
    DEFAULT_SSE_KEEP_ALIVE_SECS,
    DEFAULT_SSE_RETRY_SECS,
    McpHttpServerConfig,
};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(
    name = "mdhelp-mcpd",
    version,
    about = "Serves a directory of markdown documents as MCP tools."
)]
struct CliArgs {
    /// Directory holding the markdown documents.
    #[arg(env = "MDHELP_DIR")]
    markdown_dir: PathBuf,

    /// Remind the agent to consult this server before every task.
    #[arg(
        long,
        env = "MDHELP_REMIND_MCP",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    remind_mcp: bool,

    /// Remind the agent to keep documents small and organized.
    #[arg(
        long,
        env = "MDHELP_REMIND_ORGANIZE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    remind_organize: bool,

    /// Custom reminder appended to every response. Repeatable.
    #[arg(long = "reminder", value_name = "TEXT")]
    reminders: Vec<String>,

    /// Serve streamable HTTP instead of stdio.
    #[arg(
        long,
        env = "MDHELP_HTTP",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    http: bool,

    #[arg(long, env = "MDHELP_MCP_HTTP_ADDR", default_value_t = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    /// Seconds between SSE keep-alive pings; 0 disables them.
    #[arg(
        long,
        env = "MDHELP_SSE_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_SSE_KEEP_ALIVE_SECS
    )]
    sse_keep_alive_secs: u64,

    /// Seconds clients wait before reconnecting an SSE stream; 0 omits the hint.
    #[arg(
        long,
        env = "MDHELP_SSE_RETRY_SECS",
        default_value_t = DEFAULT_SSE_RETRY_SECS
    )]
    sse_retry_secs: u64,

    /// Disable HTTP session tracking.
    #[arg(
        long,
        env = "MDHELP_STATELESS",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    stateless: bool,
}

/// Transport the daemon serves MCP over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http(McpHttpServerConfig),
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct MdHelpConfig {
    pub markdown_dir: PathBuf,
    pub reminders: ReminderConfig,
    pub transport: Transport,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("markdown directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("markdown path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("invalid {name} value: {value}")]
    InvalidSetting { name: &'static str, value: String },
}

impl MdHelpConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        Self::try_from(CliArgs::parse())
    }
}

impl TryFrom<CliArgs> for MdHelpConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.markdown_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "MDHELP_DIR",
                value: String::new(),
            });
        }

        let markdown_dir = match std::fs::canonicalize(&args.markdown_dir) {
            Ok(path) => path,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::MissingDirectory(args.markdown_dir));
            }
            Err(_) => {
                return Err(ConfigError::InvalidSetting {
                    name: "MDHELP_DIR",
                    value: args.markdown_dir.display().to_string(),
                });
            }
        };
        if !markdown_dir.is_dir() {
            return Err(ConfigError::NotADirectory(markdown_dir));
        }

        let custom_reminders = args
            .reminders
            .into_iter()
            .map(|reminder| reminder.trim().to_string())
            .filter(|reminder| !reminder.is_empty())
            .collect();

        let transport = if args.http {
            Transport::Http(
                McpHttpServerConfig::new(args.mcp_http_addr)
                    .with_stateful_mode(!args.stateless)
                    .with_sse_keep_alive(seconds(args.sse_keep_alive_secs))
                    .with_sse_retry(seconds(args.sse_retry_secs)),
            )
        } else {
            Transport::Stdio
        };

        Ok(Self {
            markdown_dir,
            reminders: ReminderConfig::new(args.remind_mcp, args.remind_organize, custom_reminders),
            transport,
        })
    }
}

fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
