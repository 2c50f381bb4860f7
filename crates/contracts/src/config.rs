//! DispatchConfig - Config Loader output
//!
//! Top-level configuration document: the default channel list plus named
//! profiles, and the shared credential store loaded alongside it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ChannelConfig;

/// Complete dispatch configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Default channel list.
    #[serde(default)]
    pub outputs: Vec<ChannelConfig>,

    /// Named alternate channel lists. Selecting a profile replaces
    /// `outputs`; it does not merge with it.
    #[serde(default)]
    pub profiles: BTreeMap<String, Vec<ChannelConfig>>,
}

impl DispatchConfig {
    /// Channel list for an optionally named profile.
    ///
    /// An unknown profile name yields an empty list; the caller decides how
    /// loudly to report that.
    pub fn channel_list(&self, profile: Option<&str>) -> &[ChannelConfig] {
        match profile {
            Some(name) => self
                .profiles
                .get(name)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            None => &self.outputs,
        }
    }
}

/// Process-wide credential store.
///
/// Loaded once at startup and injected into handler construction; handlers
/// never re-read it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub telegram: TelegramCredentials,
}

/// Shared Telegram bot credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramCredentials {
    #[serde(default)]
    pub bot_token: Option<String>,
}
