//! Schema system for Quiver.

mod schema;

pub use schema::{ColumnInfo, Schema};
