//! # Renderers
//!
//! Pure digest-to-text transforms, one per content shape:
//!
//! - [`recap`]: short plain text for notification channels
//! - [`markdown`]: full structured text for durable storage
//! - [`html`]: same content as markdown, as a self-contained styled document
//!   for mail clients
//!
//! All three are deterministic apart from the embedded current timestamp.
//! `markdown` and `html` share their grouping logic, so both always emit the
//! same categories, sources, and article order.

mod group;
mod html;
mod markdown;
mod recap;

pub use html::html;
pub use markdown::markdown;
pub use recap::recap;
