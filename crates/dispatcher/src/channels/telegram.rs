//! TelegramChannel - Bot API notification delivery

use std::time::Duration;

use contracts::{ChannelConfig, ChannelKind, ContentKind, Digest};
use tracing::{info, instrument, warn};

const API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends the rendered digest to a Telegram chat via the Bot API.
///
/// The token comes from the channel entry, else from the credential store
/// injected at construction. Missing token or chat id is a delivery
/// failure for this channel, never fatal to the run.
pub struct TelegramChannel {
    http: reqwest::Client,
    api_base: String,
    fallback_token: Option<String>,
}

impl TelegramChannel {
    /// Create a channel with an optional token from the credential store.
    pub fn new(fallback_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: API_BASE.to_string(),
            fallback_token,
        }
    }

    /// Point the channel at a different API endpoint.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    #[instrument(name = "telegram_deliver", skip(self, cfg, digest))]
    pub async fn deliver(&self, cfg: &ChannelConfig, digest: &Digest) -> bool {
        let token = cfg
            .bot_token
            .clone()
            .or_else(|| self.fallback_token.clone())
            .filter(|t| !t.is_empty());
        let Some(token) = token else {
            warn!("bot_token not set in channel config or credential store");
            return false;
        };
        let chat_id = cfg.chat_id.clone().filter(|c| !c.is_empty());
        let Some(chat_id) = chat_id else {
            warn!("chat_id required");
            return false;
        };

        let text = match cfg.content_for(ChannelKind::Telegram) {
            ContentKind::Recap => renderers::recap(digest),
            ContentKind::FullDigest => renderers::markdown(digest),
        };

        let payload = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
            "disable_web_page_preview": true,
        });
        let url = format!("{}/bot{}/sendMessage", self.api_base, token);

        let response = self
            .http
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Bot API request failed");
                return false;
            }
        };

        match response.json::<serde_json::Value>().await {
            Ok(body) if body.get("ok").and_then(|v| v.as_bool()).unwrap_or(false) => {
                info!("delivered");
                true
            }
            Ok(body) => {
                let description = body
                    .get("description")
                    .and_then(|v| v.as_str())
                    .unwrap_or("?");
                warn!(description, "Bot API rejected message");
                false
            }
            Err(e) => {
                warn!(error = %e, "invalid Bot API response");
                false
            }
        }
    }
}
