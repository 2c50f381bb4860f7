//! # Dispatcher
//!
//! Delivery of a digest to configured channels.
//!
//! Responsibilities:
//! - one handler per channel kind, failures reported as booleans plus logs
//! - delegation to external delivery tools, with the mail fallback chain
//! - one sequential orchestration pass aggregating ok / fail / skip

pub mod channels;
pub mod delegate;
pub mod orchestrator;

pub use channels::{FileChannel, MailChannel, NextcloudChannel, TelegramChannel};
pub use contracts::{Delegate, DelegateError, DispatchReport};
pub use delegate::CommandDelegate;
pub use orchestrator::{dispatch, run, Channels, HandlerSet};
