//! Construction context shared by a selector namespace and its selectors.

use common_config::{ApiVersion, BackendVersion, QuiverConfig};

/// Versions and evaluation flags a selector is built with.
///
/// Selectors keep the context they were built with so that complement can
/// build `all()` in the same version, and so that degrading to an `Expr`
/// stamps the right identity metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectorContext {
    /// Dtype catalog version.
    pub version: ApiVersion,
    /// Backend version stamped on degraded expressions.
    pub backend_version: BackendVersion,
    /// Log every node during evaluation.
    pub trace_selections: bool,
}

impl SelectorContext {
    /// Derive the context from a configuration.
    pub fn from_config(config: &QuiverConfig) -> Self {
        Self {
            version: config.dtypes.version,
            backend_version: config.evaluation.backend_version,
            trace_selections: config.evaluation.trace_selections,
        }
    }
}
