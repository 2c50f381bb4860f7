//! Configuration parsing
//!
//! JSON is the primary format; TOML is accepted by extension.

use contracts::{ContractError, Credentials, DispatchConfig};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (primary)
    Json,
    /// TOML format
    Toml,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parse JSON dispatch configuration
pub fn parse_json(content: &str) -> Result<DispatchConfig, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse TOML dispatch configuration
pub fn parse_toml(content: &str) -> Result<DispatchConfig, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse configuration content by format
pub fn parse(content: &str, format: ConfigFormat) -> Result<DispatchConfig, ContractError> {
    match format {
        ConfigFormat::Json => parse_json(content),
        ConfigFormat::Toml => parse_toml(content),
    }
}

/// Parse the credential store document (JSON only)
pub fn parse_credentials(content: &str) -> Result<Credentials, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("credentials parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "outputs": [
                { "type": "telegram_bot", "chat_id": 42, "content": "recap" },
                { "type": "mail-client", "mail_to": "team@example.org" }
            ]
        }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.outputs.len(), 2);
        assert_eq!(config.outputs[0].chat_id.as_deref(), Some("42"));
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[[outputs]]
type = "nextcloud"
path = "/digests/latest.md"

[[profiles.urgent]]
type = "telegram_bot"
chat_id = "42"
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.outputs.len(), 1);
        assert_eq!(config.profiles["urgent"].len(), 1);
    }

    #[test]
    fn test_parse_json_syntax_error() {
        let result = parse_json("not json {{{");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ContractError::ConfigParse { .. }));
    }

    #[test]
    fn test_parse_credentials() {
        let creds = parse_credentials(r#"{ "telegram": { "bot_token": "123:abc" } }"#).unwrap();
        assert_eq!(creds.telegram.bot_token.as_deref(), Some("123:abc"));

        let creds = parse_credentials("{}").unwrap();
        assert!(creds.telegram.bot_token.is_none());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_extension("JSON"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
