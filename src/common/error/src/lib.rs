//! Error types and result aliases for Quiver.
//!
//! Every crate in the workspace reports failures through [`QuiverError`].
//! Errors raised by a dataset backend are passed through unchanged.

mod error;

pub use error::{QuiverError, QuiverResult};
