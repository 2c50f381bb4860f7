//! CLI command implementations.

mod send;
mod validate;

pub use send::run_send;
pub use validate::run_validate;
