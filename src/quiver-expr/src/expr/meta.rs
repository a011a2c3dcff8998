//! Identity metadata and deferred column sources.

use common_config::{ApiVersion, BackendVersion};
use common_error::QuiverResult;
use quiver_core::{Column, Dataset};

/// A deferred multi-output column producer.
///
/// Evaluated against a dataset at expression evaluation time. Implementors
/// must be pure: the same dataset yields the same columns.
pub trait ColumnSource: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// Produce the columns this source stands for, in output order.
    fn columns(&self, dataset: &dyn Dataset) -> QuiverResult<Vec<Column>>;
}

/// Identity metadata an expression carries for diagnostics.
///
/// None of these fields affect evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprMeta {
    /// Nesting depth of the producing function.
    pub depth: usize,
    /// Name of the function that produced the expression.
    pub function_name: String,
    /// Input column names, if known before evaluation.
    pub root_names: Option<Vec<String>>,
    /// Output column names, if known before evaluation.
    pub output_names: Option<Vec<String>>,
    /// Backend the expression evaluates on.
    pub backend_version: BackendVersion,
    /// Whether the expression reduces to a scalar.
    pub returns_scalar: bool,
    /// Dtype catalog version.
    pub version: ApiVersion,
}

impl ExprMeta {
    /// Metadata for a depth-0 function with unknown root and output names.
    pub fn new(
        function_name: impl Into<String>,
        backend_version: BackendVersion,
        version: ApiVersion,
    ) -> Self {
        Self {
            depth: 0,
            function_name: function_name.into(),
            root_names: None,
            output_names: None,
            backend_version,
            returns_scalar: false,
            version,
        }
    }
}

impl std::fmt::Display for ExprMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "depth={}, function_name={}, root_names={:?}, output_names={:?}",
            self.depth, self.function_name, self.root_names, self.output_names
        )
    }
}
