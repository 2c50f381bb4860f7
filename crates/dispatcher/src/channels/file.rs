//! FileChannel - local filesystem delivery

use std::path::PathBuf;

use contracts::{ChannelConfig, ChannelKind, ContentKind, Digest};
use tracing::{info, instrument, warn};

/// Writes the rendered digest to a local path, creating parent
/// directories as needed. `~/` expands to the home directory.
#[derive(Debug, Default)]
pub struct FileChannel;

impl FileChannel {
    pub fn new() -> Self {
        Self
    }

    #[instrument(name = "file_deliver", skip(self, cfg, digest))]
    pub async fn deliver(&self, cfg: &ChannelConfig, digest: &Digest) -> bool {
        let path = cfg.path.clone().filter(|p| !p.is_empty());
        let Some(path) = path else {
            warn!("path required");
            return false;
        };
        let path = expand_home(&path);

        let text = match cfg.content_for(ChannelKind::File) {
            ContentKind::Recap => renderers::recap(digest),
            ContentKind::FullDigest => renderers::markdown(digest),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                warn!(error = %e, parent = %parent.display(), "could not create parent directory");
                return false;
            }
        }

        match tokio::fs::write(&path, text).await {
            Ok(()) => {
                info!(path = %path.display(), "delivered");
                true
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "write failed");
                false
            }
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}
