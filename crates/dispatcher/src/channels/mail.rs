//! MailChannel - tool delegation with direct SMTP fallback
//!
//! Delivery order: delegate to the external mail tool first; on any
//! delegation failure, make exactly one direct SMTP attempt with the
//! credentials from the channel entry. The fallback never runs after a
//! delegation success, so a digest is never delivered twice.

use std::time::Duration;

use chrono::Utc;
use contracts::{ChannelConfig, ChannelKind, ContentKind, Delegate, Digest};
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, instrument, warn};

/// Name of the external mail-sending tool.
pub const MAIL_TOOL: &str = "mail-client";

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_SMTP_PORT: u16 = 587;

/// Direct mail transport behind the fallback.
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Send one message; diagnostics are logged, the boolean is the result.
    async fn send(
        &self,
        cfg: &ChannelConfig,
        to: &str,
        subject: &str,
        plain: String,
        html: Option<String>,
    ) -> bool;
}

/// Mail delivery channel.
pub struct MailChannel<D, S = SmtpMailer> {
    delegate: D,
    mailer: S,
}

impl<D: Delegate + Sync> MailChannel<D> {
    /// Create a channel delegating to the mail tool, with the SMTP
    /// transport as fallback.
    pub fn new(delegate: D) -> Self {
        Self {
            delegate,
            mailer: SmtpMailer,
        }
    }
}

impl<D: Delegate + Sync, S: Mailer + Sync> MailChannel<D, S> {
    /// Substitute the fallback transport.
    pub fn with_mailer<M: Mailer + Sync>(self, mailer: M) -> MailChannel<D, M> {
        MailChannel {
            delegate: self.delegate,
            mailer,
        }
    }

    #[instrument(name = "mail_deliver", skip(self, cfg, digest))]
    pub async fn deliver(&self, cfg: &ChannelConfig, digest: &Digest) -> bool {
        let mail_to = cfg.mail_to.clone().filter(|t| !t.is_empty());
        let Some(mail_to) = mail_to else {
            warn!("mail_to required");
            return false;
        };

        let subject = cfg
            .subject
            .clone()
            .unwrap_or_else(|| format!("Digest - {}", Utc::now().format("%d/%m/%Y")));

        let (body_plain, body_html) = match cfg.content_for(ChannelKind::Mail) {
            ContentKind::Recap => (renderers::recap(digest), None),
            ContentKind::FullDigest => {
                (renderers::markdown(digest), Some(renderers::html(digest)))
            }
        };

        let mut args = vec![
            "send".to_string(),
            "--to".to_string(),
            mail_to.clone(),
            "--subject".to_string(),
            subject.clone(),
            "--body".to_string(),
            body_plain.clone(),
        ];
        if let Some(ref html) = body_html {
            args.push("--html".to_string());
            args.push(html.clone());
        }

        match self.delegate.invoke(MAIL_TOOL, &args).await {
            Ok(()) => {
                info!(to = %mail_to, "delivered via mail tool");
                return true;
            }
            Err(e) => {
                warn!(error = %e, "mail tool delegation failed, trying direct send");
            }
        }

        self.mailer
            .send(cfg, &mail_to, &subject, body_plain, body_html)
            .await
    }
}

/// SMTP transport with STARTTLS, driven by channel-entry credentials.
pub struct SmtpMailer;

impl Mailer for SmtpMailer {
    async fn send(
        &self,
        cfg: &ChannelConfig,
        to: &str,
        subject: &str,
        plain: String,
        html: Option<String>,
    ) -> bool {
        let (Some(host), Some(user), Some(pass)) = (
            cfg.smtp_host.clone().filter(|s| !s.is_empty()),
            cfg.smtp_user.clone().filter(|s| !s.is_empty()),
            cfg.smtp_pass.clone().filter(|s| !s.is_empty()),
        ) else {
            warn!("smtp_host/smtp_user/smtp_pass required for direct send");
            return false;
        };
        let port = cfg.smtp_port.unwrap_or(DEFAULT_SMTP_PORT);
        let from = cfg.mail_from.clone().unwrap_or_else(|| user.clone());

        let from: Mailbox = match from.parse() {
            Ok(mb) => mb,
            Err(e) => {
                warn!(error = %e, "invalid from address");
                return false;
            }
        };
        let to_mb: Mailbox = match to.parse() {
            Ok(mb) => mb,
            Err(e) => {
                warn!(error = %e, "invalid recipient address");
                return false;
            }
        };

        let builder = Message::builder()
            .from(from)
            .to(to_mb)
            .subject(subject)
            .date_now();
        let message = match html {
            Some(html) => builder.multipart(MultiPart::alternative_plain_html(plain, html)),
            None => builder.header(ContentType::TEXT_PLAIN).body(plain),
        };
        let message = match message {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "could not build message");
                return false;
            }
        };

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host) {
            Ok(builder) => builder
                .port(port)
                .credentials(SmtpCredentials::new(user, pass))
                .timeout(Some(SMTP_TIMEOUT))
                .build(),
            Err(e) => {
                warn!(error = %e, "smtp transport setup failed");
                return false;
            }
        };

        match transport.send(message).await {
            Ok(_) => {
                info!(host = %host, "delivered via direct send");
                true
            }
            Err(e) => {
                warn!(error = %e, "direct send failed");
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
    use std::sync::Arc;

    fn raw_digest() -> Digest {
        Digest::Raw(RawDigest {
            hours: 24,
            count: 1,
            skipped_url: 0,
            skipped_topic: 0,
            articles: vec![],
        })
    }

    fn mail_cfg() -> ChannelConfig {
        let mut cfg = ChannelConfig::new("mail-client");
        cfg.mail_to = Some("team@example.org".into());
        cfg
    }

    /// Delegate fake recording invocations and their arguments.
    struct FakeDelegate {
        calls: Arc<AtomicU64>,
        last_args: std::sync::Mutex<Vec<String>>,
        succeed: bool,
    }

    impl FakeDelegate {
        fn new(succeed: bool) -> Self {
            Self {
                calls: Arc::new(AtomicU64::new(0)),
                last_args: std::sync::Mutex::new(vec![]),
                succeed,
            }
        }
    }

    impl Delegate for FakeDelegate {
        async fn invoke(&self, tool: &str, args: &[String]) -> Result<(), DelegateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_args.lock().unwrap() = args.to_vec();
            if self.succeed {
                Ok(())
            } else {
                Err(DelegateError::NonZeroExit {
                    tool: tool.to_string(),
                    code: Some(1),
                    stderr: "fake failure".into(),
                })
            }
        }
    }

    /// Fallback fake counting attempts.
    struct CountingMailer {
        sends: Arc<AtomicU64>,
        succeed: bool,
    }

    impl Mailer for CountingMailer {
        async fn send(
            &self,
            _cfg: &ChannelConfig,
            _to: &str,
            _subject: &str,
            _plain: String,
            _html: Option<String>,
        ) -> bool {
            self.sends.fetch_add(1, Ordering::SeqCst);
            self.succeed
        }
    }

    #[tokio::test]
    async fn delegation_success_never_touches_fallback() {
        let sends = Arc::new(AtomicU64::new(0));
        let delegate = FakeDelegate::new(true);
        let calls = Arc::clone(&delegate.calls);
        let channel = MailChannel::new(delegate).with_mailer(CountingMailer {
            sends: Arc::clone(&sends),
            succeed: false,
        });

        assert!(channel.deliver(&mail_cfg(), &raw_digest()).await);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(sends.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delegation_failure_triggers_fallback_exactly_once() {
        let sends = Arc::new(AtomicU64::new(0));
        let channel = MailChannel::new(FakeDelegate::new(false)).with_mailer(CountingMailer {
            sends: Arc::clone(&sends),
            succeed: true,
        });

        assert!(channel.deliver(&mail_cfg(), &raw_digest()).await);
        assert_eq!(sends.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_recipient_fails_before_any_transport() {
        let sends = Arc::new(AtomicU64::new(0));
        let delegate = FakeDelegate::new(true);
        let calls = Arc::clone(&delegate.calls);
        let channel = MailChannel::new(delegate).with_mailer(CountingMailer {
            sends: Arc::clone(&sends),
            succeed: true,
        });

        let cfg = ChannelConfig::new("mail-client");
        assert!(!channel.deliver(&cfg, &raw_digest()).await);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(sends.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn full_digest_passes_html_to_the_tool() {
        let delegate = FakeDelegate::new(true);
        let channel = MailChannel::new(delegate);

        let mut cfg = mail_cfg();
        cfg.content = Some(contracts::ContentKind::FullDigest);
        assert!(channel.deliver(&cfg, &raw_digest()).await);

        let args = channel.delegate.last_args.lock().unwrap().clone();
        assert!(args.contains(&"--html".to_string()));
        assert_eq!(args[0], "send");
    }

    #[tokio::test]
    async fn recap_content_sends_plain_only() {
        let delegate = FakeDelegate::new(true);
        let channel = MailChannel::new(delegate);

        let mut cfg = mail_cfg();
        cfg.content = Some(contracts::ContentKind::Recap);
        assert!(channel.deliver(&cfg, &raw_digest()).await);

        let args = channel.delegate.last_args.lock().unwrap().clone();
        assert!(!args.contains(&"--html".to_string()));
    }

    #[tokio::test]
    async fn smtp_fallback_without_credentials_is_hard_failure() {
        let channel = MailChannel::new(FakeDelegate::new(false));
        // delegation fails, and no smtp_* fields are present
        assert!(!channel.deliver(&mail_cfg(), &raw_digest()).await);
    }
}
