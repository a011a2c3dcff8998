//! Literal values used in expressions.

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray, new_null_array};
use arrow::datatypes::DataType as ArrowDataType;
use serde::{Deserialize, Serialize};

use super::DType;

/// Literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string.
    String(String),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The dtype a literal of this value has before any cast.
    pub fn dtype(&self) -> DType {
        match self {
            Self::Null => DType::Unknown,
            Self::Bool(_) => DType::Boolean,
            Self::Int64(_) => DType::Int64,
            Self::Float64(_) => DType::Float64,
            Self::String(_) => DType::String,
        }
    }

    /// Materialize this value as an arrow array of `len` rows.
    pub fn to_array(&self, len: usize) -> ArrayRef {
        match self {
            Self::Null => new_null_array(&ArrowDataType::Null, len),
            Self::Bool(b) => Arc::new(BooleanArray::from(vec![*b; len])),
            Self::Int64(i) => Arc::new(Int64Array::from(vec![*i; len])),
            Self::Float64(f) => Arc::new(Float64Array::from(vec![*f; len])),
            Self::String(s) => Arc::new(StringArray::from(vec![s.as_str(); len])),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int64(i) => write!(f, "{i}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int64(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int64(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float64(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}
