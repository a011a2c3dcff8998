//! Dtype membership: exact dtypes and whole dtype families.

use serde::{Deserialize, Serialize};

use super::{DType, DTypeKind};

/// One entry of a dtype set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DTypeMatcher {
    /// Matches a fully specified dtype (with the datetime `"*"` zone wildcard).
    Exact(DType),
    /// Matches every dtype of a family, whatever its parameters.
    Kind(DTypeKind),
}

impl DTypeMatcher {
    /// Check whether `dtype` is matched.
    pub fn matches(&self, dtype: &DType) -> bool {
        match self {
            Self::Exact(pattern) => pattern.matches(dtype),
            Self::Kind(kind) => dtype.kind() == *kind,
        }
    }
}

impl From<DType> for DTypeMatcher {
    fn from(dtype: DType) -> Self {
        Self::Exact(dtype)
    }
}

impl From<DTypeKind> for DTypeMatcher {
    fn from(kind: DTypeKind) -> Self {
        Self::Kind(kind)
    }
}

impl std::fmt::Display for DTypeMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(dtype) => write!(f, "{dtype}"),
            Self::Kind(kind) => write!(f, "{kind:?}(*)"),
        }
    }
}

/// An unordered collection of dtype matchers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DTypeSet {
    matchers: Vec<DTypeMatcher>,
}

impl DTypeSet {
    /// Create an empty set (matches nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a matcher; duplicates are ignored.
    pub fn insert(&mut self, matcher: impl Into<DTypeMatcher>) {
        let matcher = matcher.into();
        if !self.matchers.contains(&matcher) {
            self.matchers.push(matcher);
        }
    }

    /// Check whether `dtype` is a member of this set.
    pub fn contains(&self, dtype: &DType) -> bool {
        self.matchers.iter().any(|m| m.matches(dtype))
    }

    /// The matchers in insertion order.
    pub fn matchers(&self) -> &[DTypeMatcher] {
        &self.matchers
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Number of distinct matchers.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }
}

impl<M: Into<DTypeMatcher>> FromIterator<M> for DTypeSet {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        let mut set = Self::new();
        for matcher in iter {
            set.insert(matcher);
        }
        set
    }
}

impl std::fmt::Display for DTypeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, matcher) in self.matchers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{matcher}")?;
        }
        write!(f, "}}")
    }
}
