//! Dtype module for Quiver.
//!
//! This module defines the logical `DType` tags used for column filtering,
//! the membership rules selectors rely on (`DTypeSet`), the versioned
//! `DTypeCatalog`, the datetime selector resolver, and literal `Value`s.

mod catalog;
mod datetime;
mod dtype;
mod matcher;
mod value;

pub use catalog::DTypeCatalog;
pub use datetime::{TimeUnitSpec, TimeZoneSpec, resolve_datetime_selector};
pub use dtype::{ANY_TIME_ZONE, DType, DTypeKind, TimeUnit};
pub use matcher::{DTypeMatcher, DTypeSet};
pub use value::Value;
