//! Channel handler implementations
//!
//! One handler per channel kind. All share the same contract: render per
//! the entry's `content`, attempt delivery, log diagnostics, and return a
//! plain boolean. No handler raises delivery failures to the caller.

mod file;
mod mail;
mod nextcloud;
mod telegram;

pub use self::file::FileChannel;
pub use self::mail::{MailChannel, Mailer, SmtpMailer, MAIL_TOOL};
pub use self::nextcloud::{NextcloudChannel, NEXTCLOUD_TOOL};
pub use self::telegram::TelegramChannel;
