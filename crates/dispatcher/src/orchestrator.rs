//! Sequential dispatch over the configured channel list
//!
//! One pass, in config order. A channel's failure is recorded and the pass
//! continues; nothing a handler does can abort the run.

use contracts::{ChannelConfig, ChannelKind, Credentials, Digest, DispatchConfig, DispatchReport};
use tracing::{info, instrument, warn};

use crate::channels::{FileChannel, MailChannel, NextcloudChannel, TelegramChannel};
use crate::delegate::CommandDelegate;

/// Handler lookup seam between the orchestrator and the channel
/// implementations.
#[trait_variant::make(HandlerSet: Send)]
pub trait LocalHandlerSet {
    /// Deliver to one resolved channel; the boolean is the outcome.
    async fn deliver(&self, kind: ChannelKind, cfg: &ChannelConfig, digest: &Digest) -> bool;
}

/// Production handler set: one handler per channel kind.
pub struct Channels {
    telegram: TelegramChannel,
    mail: MailChannel<CommandDelegate>,
    nextcloud: NextcloudChannel<CommandDelegate>,
    file: FileChannel,
}

impl Channels {
    /// Build the full handler set from the shared credential store and the
    /// tool delegate.
    pub fn new(credentials: &Credentials, delegate: CommandDelegate) -> Self {
        Self {
            telegram: TelegramChannel::new(credentials.telegram.bot_token.clone()),
            mail: MailChannel::new(delegate.clone()),
            nextcloud: NextcloudChannel::new(delegate),
            file: FileChannel::new(),
        }
    }
}

impl HandlerSet for Channels {
    async fn deliver(&self, kind: ChannelKind, cfg: &ChannelConfig, digest: &Digest) -> bool {
        match kind {
            ChannelKind::Telegram => self.telegram.deliver(cfg, digest).await,
            ChannelKind::Mail => self.mail.deliver(cfg, digest).await,
            ChannelKind::Nextcloud => self.nextcloud.deliver(cfg, digest).await,
            ChannelKind::File => self.file.deliver(cfg, digest).await,
        }
    }
}

/// Deliver the digest to every entry of one channel list, in order.
#[instrument(name = "dispatch_run", skip_all, fields(channels = channels.len()))]
pub async fn run<H: HandlerSet + Sync>(
    handlers: &H,
    channels: &[ChannelConfig],
    digest: &Digest,
) -> DispatchReport {
    let mut report = DispatchReport::default();
    if channels.is_empty() {
        info!("no channels configured, nothing to deliver");
        return report;
    }

    for cfg in channels {
        if !cfg.enabled {
            info!(channel = %cfg.kind, "disabled, skipping");
            report.skip.push(cfg.kind.clone());
            continue;
        }
        let Some(kind) = ChannelKind::parse(&cfg.kind) else {
            warn!(channel = %cfg.kind, "unknown channel type, skipping");
            report.skip.push(cfg.kind.clone());
            continue;
        };

        if handlers.deliver(kind, cfg, digest).await {
            report.ok.push(cfg.kind.clone());
        } else {
            report.fail.push(cfg.kind.clone());
        }
    }

    info!(
        ok = report.ok.len(),
        fail = report.fail.len(),
        skip = report.skip.len(),
        "dispatch complete"
    );
    report
}

/// Deliver the digest to the channel list selected by `profile`.
pub async fn dispatch<H: HandlerSet + Sync>(
    handlers: &H,
    config: &DispatchConfig,
    profile: Option<&str>,
    digest: &Digest,
) -> DispatchReport {
    let channels = config.channel_list(profile);
    if channels.is_empty() {
        match profile {
            Some(name) if !config.profiles.contains_key(name) => {
                warn!(profile = %name, "profile not found in config");
            }
            _ => warn!("channel list is empty"),
        }
    }
    run(handlers, channels, digest).await
}
