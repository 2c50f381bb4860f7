//! `send` command implementation.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use config_loader::ConfigLoader;
use contracts::{Credentials, Digest, DispatchConfig};
use dispatcher::{dispatch, Channels, CommandDelegate};

use crate::cli::SendArgs;

/// Execute the `send` command
pub async fn run_send(args: &SendArgs) -> Result<()> {
    let digest = read_digest()?;
    info!(articles = digest.article_count(), "digest read from stdin");

    let config = load_config_or_default(&args.config)?;
    let credentials = load_credentials(args.credentials.as_deref())?;

    let delegate = CommandDelegate::new(&args.tools_dir)
        .with_timeout(Duration::from_secs(args.tool_timeout));
    let channels = Channels::new(&credentials, delegate);

    let report = dispatch(&channels, &config, args.profile.as_deref(), &digest).await;

    let summary = serde_json::json!({ "dispatched": &report });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !report.fail.is_empty() {
        anyhow::bail!("{} channel(s) failed", report.fail.len());
    }
    Ok(())
}

/// Parse the digest document from stdin. Malformed input is fatal: there is
/// nothing to deliver.
fn read_digest() -> Result<Digest> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    serde_json::from_str(&input).context("stdin is not a valid digest document")
}

/// A missing config file is not fatal: deliveries are simply not configured,
/// and the run reports an empty channel list.
fn load_config_or_default(path: &Path) -> Result<DispatchConfig> {
    if !path.exists() {
        warn!(config = %path.display(), "config file not found, using empty config");
        return Ok(DispatchConfig::default());
    }
    ConfigLoader::load_from_path(path)
        .with_context(|| format!("Failed to load config: {}", path.display()))
}

fn load_credentials(path: Option<&Path>) -> Result<Credentials> {
    let Some(path) = path else {
        return Ok(Credentials::default());
    };
    if !path.exists() {
        warn!(credentials = %path.display(), "credential store not found");
        return Ok(Credentials::default());
    }
    ConfigLoader::load_credentials(path)
        .with_context(|| format!("Failed to load credentials: {}", path.display()))
}
