//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::{ChannelKind, DispatchConfig};

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    output_count: usize,
    profile_count: usize,
    enabled_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(config) => {
            let warnings = collect_warnings(&config);
            let enabled_count = config.outputs.iter().filter(|c| c.enabled).count();

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    output_count: config.outputs.len(),
                    profile_count: config.profiles.len(),
                    enabled_count,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &DispatchConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.outputs.is_empty() {
        warnings.push("No outputs configured - nothing will be delivered".to_string());
    }

    let all_entries = config
        .outputs
        .iter()
        .map(|c| ("outputs", c))
        .chain(
            config
                .profiles
                .iter()
                .flat_map(|(name, list)| list.iter().map(move |c| (name.as_str(), c))),
        );

    for (list_name, entry) in all_entries {
        let label = format!("{}/{}", list_name, entry.kind);

        let Some(kind) = ChannelKind::parse(&entry.kind) else {
            warnings.push(format!("{label}: unknown channel type, will be skipped"));
            continue;
        };
        if !entry.enabled {
            warnings.push(format!("{label}: disabled"));
        }

        // Per-kind fields that would fail the channel at delivery time.
        match kind {
            ChannelKind::Telegram if entry.chat_id.is_none() => {
                warnings.push(format!("{label}: chat_id not set"));
            }
            ChannelKind::Mail if entry.mail_to.is_none() => {
                warnings.push(format!("{label}: mail_to not set"));
            }
            ChannelKind::Nextcloud | ChannelKind::File if entry.path.is_none() => {
                warnings.push(format!("{label}: path not set"));
            }
            _ => {}
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Outputs: {}", summary.output_count);
            println!("  Enabled: {}", summary.enabled_count);
            println!("  Profiles: {}", summary.profile_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
