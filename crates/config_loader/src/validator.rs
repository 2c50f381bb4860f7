//! Configuration validation
//!
//! Rules:
//! - every entry in `outputs` carries a non-empty `type` label
//! - every profile entry does as well
//!
//! Unknown type labels and missing per-kind fields are deliberately NOT
//! validated here: the former are skips and the latter are delivery-time
//! failures, so one bad entry never blocks the rest of the run.

use contracts::{ChannelConfig, ContractError, DispatchConfig};

/// Validate a DispatchConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &DispatchConfig) -> Result<(), ContractError> {
    validate_entries("outputs", &config.outputs)?;
    for (name, entries) in &config.profiles {
        validate_entries(&format!("profiles.{name}"), entries)?;
    }
    Ok(())
}

fn validate_entries(section: &str, entries: &[ChannelConfig]) -> Result<(), ContractError> {
    for (idx, entry) in entries.iter().enumerate() {
        if entry.kind.is_empty() {
            return Err(ContractError::config_validation(
                format!("{section}[{idx}].type"),
                "channel type cannot be empty",
            ));
        }
    }
    Ok(())
}
