//! NextcloudChannel - remote file upload via the nextcloud tool
//!
//! No direct transport exists for this channel; a missing tool is a
//! delivery failure like any other.

use contracts::{ChannelConfig, ChannelKind, ContentKind, Delegate, Digest};
use tracing::{info, instrument, warn};

/// Name of the external nextcloud upload tool.
pub const NEXTCLOUD_TOOL: &str = "nextcloud";

/// Writes the rendered digest to a remote path through the nextcloud tool.
pub struct NextcloudChannel<D> {
    delegate: D,
}

impl<D: Delegate + Sync> NextcloudChannel<D> {
    pub fn new(delegate: D) -> Self {
        Self { delegate }
    }

    #[instrument(name = "nextcloud_deliver", skip(self, cfg, digest))]
    pub async fn deliver(&self, cfg: &ChannelConfig, digest: &Digest) -> bool {
        let path = cfg.path.clone().filter(|p| !p.is_empty());
        let Some(path) = path else {
            warn!("path required");
            return false;
        };

        let text = match cfg.content_for(ChannelKind::Nextcloud) {
            ContentKind::Recap => renderers::recap(digest),
            ContentKind::FullDigest => renderers::markdown(digest),
        };

        let args = vec![
            "write".to_string(),
            path.clone(),
            "--content".to_string(),
            text,
        ];
        match self.delegate.invoke(NEXTCLOUD_TOOL, &args).await {
            Ok(()) => {
                info!(path = %path, "delivered");
                true
            }
            Err(e) => {
                warn!(error = %e, "nextcloud tool failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{DelegateError, RawDigest};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    fn raw_digest() -> Digest {
        Digest::Raw(RawDigest {
            hours: 24,
            count: 0,
            skipped_url: 0,
            skipped_topic: 0,
            articles: vec![],
        })
    }

    struct FakeDelegate {
        calls: AtomicU64,
        last: Mutex<(String, Vec<String>)>,
        result: Option<DelegateError>,
    }

    impl FakeDelegate {
        fn ok() -> Self {
            Self {
                calls: AtomicU64::new(0),
                last: Mutex::new((String::new(), vec![])),
                result: None,
            }
        }

        fn failing() -> Self {
            Self {
                result: Some(DelegateError::ToolMissing {
                    tool: NEXTCLOUD_TOOL.to_string(),
                }),
                ..Self::ok()
            }
        }
    }

    impl Delegate for FakeDelegate {
        async fn invoke(&self, tool: &str, args: &[String]) -> Result<(), DelegateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = (tool.to_string(), args.to_vec());
            match &self.result {
                None => Ok(()),
                Some(DelegateError::ToolMissing { tool }) => Err(DelegateError::ToolMissing {
                    tool: tool.clone(),
                }),
                Some(_) => unreachable!(),
            }
        }
    }

    #[tokio::test]
    async fn missing_path_fails_without_invoking_tool() {
        let channel = NextcloudChannel::new(FakeDelegate::ok());
        let cfg = ChannelConfig::new("nextcloud");
        assert!(!channel.deliver(&cfg, &raw_digest()).await);
        assert_eq!(channel.delegate.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_upload_passes_write_command() {
        let channel = NextcloudChannel::new(FakeDelegate::ok());
        let mut cfg = ChannelConfig::new("nextcloud");
        cfg.path = Some("Digests/today.md".into());
        assert!(channel.deliver(&cfg, &raw_digest()).await);

        let (tool, args) = channel.delegate.last.lock().unwrap().clone();
        assert_eq!(tool, NEXTCLOUD_TOOL);
        assert_eq!(args[0], "write");
        assert_eq!(args[1], "Digests/today.md");
        assert_eq!(args[2], "--content");
    }

    #[tokio::test]
    async fn missing_tool_is_delivery_failure() {
        let channel = NextcloudChannel::new(FakeDelegate::failing());
        let mut cfg = ChannelConfig::new("nextcloud");
        cfg.path = Some("Digests/today.md".into());
        assert!(!channel.deliver(&cfg, &raw_digest()).await);
    }
}
