//! Channel configuration model
//!
//! One `ChannelConfig` per configured output. The config is flat and
//! lenient: per-kind required fields are enforced at delivery time, not at
//! parse time, so one underspecified entry fails that channel instead of the
//! whole run.

use serde::{Deserialize, Deserializer, Serialize};

/// Closed set of deliverable channel kinds.
///
/// Handler selection is an exhaustive match over this enum; config `type`
/// labels that do not map to a kind are skipped by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Telegram Bot API notification.
    Telegram,
    /// Mail, via external tool with direct SMTP fallback.
    Mail,
    /// Nextcloud remote store, via external tool.
    Nextcloud,
    /// Local file write.
    File,
}

impl ChannelKind {
    /// Map a config `type` label to a known kind.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "telegram_bot" => Some(Self::Telegram),
            "mail-client" => Some(Self::Mail),
            "nextcloud" => Some(Self::Nextcloud),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    /// Rendering shape used when the entry does not set `content`.
    pub fn default_content(self) -> ContentKind {
        match self {
            Self::Telegram => ContentKind::Recap,
            Self::Mail | Self::Nextcloud | Self::File => ContentKind::FullDigest,
        }
    }
}

/// Rendering shape requested by a channel entry.
///
/// Any value other than `recap` renders the full digest; the catch-all keeps
/// the permissive behavior of older configs visible in the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Short text summary for notification channels.
    Recap,
    /// Long-form rendering for durable or richly formatted channels.
    #[default]
    #[serde(other)]
    FullDigest,
}

/// One configured output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel type label; unknown labels are skipped at dispatch.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Rendering shape; defaults per channel kind when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentKind>,

    // --- telegram ---
    /// Target chat; numeric ids in the config are accepted.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub chat_id: Option<String>,

    /// Bot token; falls back to the shared credential store when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,

    // --- mail ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_to: Option<String>,

    /// Subject override; defaults to a dated subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_pass: Option<String>,

    /// From address for the direct fallback; defaults to `smtp_user`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_from: Option<String>,

    // --- nextcloud / file ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ChannelConfig {
    /// Minimal entry for the given type label.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            enabled: true,
            content: None,
            chat_id: None,
            bot_token: None,
            mail_to: None,
            subject: None,
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_pass: None,
            mail_from: None,
            path: None,
        }
    }

    /// Effective rendering shape for a resolved channel kind.
    pub fn content_for(&self, kind: ChannelKind) -> ContentKind {
        self.content.unwrap_or_else(|| kind.default_content())
    }
}

fn default_enabled() -> bool {
    true
}

/// Accept `"12345"` and `12345` alike for id-like fields.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Value {
        String(String),
        Number(i64),
    }

    Ok(Option::<Value>::deserialize(deserializer)?.map(|v| match v {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
    }))
}
