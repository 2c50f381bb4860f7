//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Digest Relay - deliver a news digest to configured channels
#[derive(Parser, Debug)]
#[command(
    name = "digest-relay",
    author,
    version,
    about = "News digest dispatch engine",
    long_about = "Reads a digest document from stdin, renders it per channel, and \n\
                  delivers it to every configured output: Telegram, mail, Nextcloud \n\
                  and local files."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "DIGEST_RELAY_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "DIGEST_RELAY_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a digest from stdin and deliver it to the configured channels
    Send(SendArgs),

    /// Validate configuration file without delivering anything
    Validate(ValidateArgs),
}

/// Arguments for the `send` command
#[derive(Parser, Debug, Clone)]
pub struct SendArgs {
    /// Path to configuration file (JSON or TOML)
    #[arg(short, long, default_value = "config.json", env = "DIGEST_RELAY_CONFIG")]
    pub config: PathBuf,

    /// Path to the shared credential store (JSON)
    #[arg(long, env = "DIGEST_RELAY_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Directory holding external delivery tools
    #[arg(long, default_value = "tools", env = "DIGEST_RELAY_TOOLS_DIR")]
    pub tools_dir: PathBuf,

    /// Deliver to a named profile instead of the default channel list
    #[arg(short, long, env = "DIGEST_RELAY_PROFILE")]
    pub profile: Option<String>,

    /// Per-tool invocation timeout in seconds
    #[arg(long, default_value = "30", env = "DIGEST_RELAY_TOOL_TIMEOUT")]
    pub tool_timeout: u64,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}
