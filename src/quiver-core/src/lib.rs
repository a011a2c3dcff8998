//! Core data model for Quiver column selection.
//!
//! This crate provides the pieces selectors and expressions evaluate against:
//! - `DType`, `DTypeSet` and `DTypeCatalog` for dtype membership
//! - the datetime selector resolver
//! - `Schema` for ordered name → dtype lookup
//! - the `Dataset` trait and `Column` handles

pub mod dataset;
pub mod schema;
pub mod testing;
pub mod types;

// Re-export commonly used types
pub use dataset::{Column, Dataset};
pub use schema::{ColumnInfo, Schema};
pub use types::{
    DType, DTypeCatalog, DTypeKind, DTypeMatcher, DTypeSet, TimeUnit, TimeUnitSpec, TimeZoneSpec,
    Value, resolve_datetime_selector,
};
