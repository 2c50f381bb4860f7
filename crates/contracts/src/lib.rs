//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Data Flow
//! Digest (stdin JSON) -> renderer (per channel `content`) -> channel handler -> transport

mod channel;
mod config;
mod delegate;
mod digest;
mod error;
mod report;

pub use channel::*;
pub use config::*;
pub use delegate::*;
pub use digest::*;
pub use error::*;
pub use report::DispatchReport;
