//! Configuration management for Quiver.
//!
//! Carries the dtype-catalog version and evaluation settings that used to be
//! implicit globals. Selector namespaces and expressions take their version
//! from here explicitly.

use serde::{Deserialize, Serialize};

/// Global Quiver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuiverConfig {
    /// Dtype catalog configuration.
    pub dtypes: DTypeConfig,
    /// Evaluation configuration.
    pub evaluation: EvaluationConfig,
}

impl QuiverConfig {
    /// Create a config pinned to the given API version.
    pub fn with_version(mut self, version: ApiVersion) -> Self {
        self.dtypes.version = version;
        self
    }

    /// Enable or disable per-node selection tracing.
    pub fn with_trace_selections(mut self, enable: bool) -> Self {
        self.evaluation.trace_selections = enable;
        self
    }
}

/// Dtype catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DTypeConfig {
    /// Which dtype catalog to construct dtypes from.
    pub version: ApiVersion,
}

/// Version of the public dtype catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ApiVersion {
    /// Stable v1 catalog.
    V1,
    /// Current catalog.
    #[default]
    Main,
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::Main => write!(f, "main"),
        }
    }
}

/// Version triple of the backend the expressions run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BackendVersion(pub u32, pub u32, pub u32);

impl BackendVersion {
    /// Version of the arrow backend this build links against.
    pub const ARROW: Self = Self(54, 0, 0);
}

impl Default for BackendVersion {
    fn default() -> Self {
        Self::ARROW
    }
}

impl std::fmt::Display for BackendVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.0, self.1, self.2)
    }
}

/// Evaluation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Backend version stamped on expressions.
    pub backend_version: BackendVersion,
    /// Log every selector node as it is evaluated (at `trace` level).
    pub trace_selections: bool,
}
