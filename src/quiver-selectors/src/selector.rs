//! Selector values and their interpreter.
//!
//! A [`Selector`] is a deferred rule over a dataset's columns. The rule is an
//! explicit [`SelectorNode`] tree; nothing is read from a dataset until
//! [`Selector::evaluate`] is called, and every call reads the schema again.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use common_error::{QuiverError, QuiverResult};
use log::{debug, trace};
use quiver_core::{Column, DType, DTypeSet, Dataset};
use quiver_expr::{ColumnSource, Expr, ExprMeta};

use crate::context::SelectorContext;

/// Function name reported by every selector.
pub const SELECTOR_FUNCTION_NAME: &str = "type_selector";

/// Set operation combining two selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOp {
    /// Left names not selected by the right, in left order.
    Difference,
    /// Left names not selected by the right, then every right name.
    Union,
    /// Left names also selected by the right, in left order.
    Intersection,
}

impl SetOp {
    /// Operator symbol.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Difference => "-",
            Self::Union => "|",
            Self::Intersection => "&",
        }
    }

    /// Combine two evaluated name lists.
    pub fn apply(&self, lhs: Vec<String>, rhs: Vec<String>) -> Vec<String> {
        let in_rhs: HashSet<&str> = rhs.iter().map(String::as_str).collect();
        match self {
            Self::Difference => lhs
                .into_iter()
                .filter(|name| !in_rhs.contains(name.as_str()))
                .collect(),
            Self::Intersection => lhs
                .into_iter()
                .filter(|name| in_rhs.contains(name.as_str()))
                .collect(),
            Self::Union => {
                let mut names: Vec<String> = lhs
                    .into_iter()
                    .filter(|name| !in_rhs.contains(name.as_str()))
                    .collect();
                names.extend(rhs);
                names
            }
        }
    }
}

impl std::fmt::Display for SetOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Selection rule tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorNode {
    /// Columns whose dtype is in the set, in dataset order.
    ByDtype(DTypeSet),
    /// Every column, in dataset order.
    All,
    /// Two rules combined by a set operation.
    Combine {
        /// Set operation.
        op: SetOp,
        /// Left rule; its order wins for difference and intersection.
        left: Arc<SelectorNode>,
        /// Right rule.
        right: Arc<SelectorNode>,
    },
}

impl SelectorNode {
    /// Resolve this rule to column names.
    fn select(&self, scope: &mut SelectionScope<'_>) -> QuiverResult<Vec<String>> {
        let names = match self {
            Self::All => scope.column_names()?.to_vec(),
            Self::ByDtype(dtypes) => {
                let (names, dtypes_by_name) = scope.names_and_dtypes()?;
                let mut selected = Vec::new();
                for name in names {
                    let dtype = dtypes_by_name.get(name.as_str()).ok_or_else(|| {
                        QuiverError::schema_error(format!(
                            "column '{name}' is missing from the dataset schema"
                        ))
                    })?;
                    if dtypes.contains(dtype) {
                        selected.push(name.clone());
                    }
                }
                selected
            }
            Self::Combine { op, left, right } => {
                let lhs = left.select(scope)?;
                let rhs = right.select(scope)?;
                op.apply(lhs, rhs)
            }
        };
        if scope.trace {
            trace!("{self} -> {names:?}");
        }
        Ok(names)
    }
}

impl std::fmt::Display for SelectorNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByDtype(dtypes) => write!(f, "by_dtype({dtypes})"),
            Self::All => write!(f, "all()"),
            Self::Combine { op, left, right } => write!(f, "({left} {op} {right})"),
        }
    }
}

/// Dataset reads shared by every node of one evaluation.
///
/// Lives for a single [`Selector::evaluate`] call, so a schema change between
/// calls is always observed.
struct SelectionScope<'a> {
    dataset: &'a dyn Dataset,
    names: Option<Vec<String>>,
    dtypes: Option<HashMap<String, DType>>,
    trace: bool,
}

impl<'a> SelectionScope<'a> {
    fn new(dataset: &'a dyn Dataset, trace: bool) -> Self {
        Self {
            dataset,
            names: None,
            dtypes: None,
            trace,
        }
    }

    fn column_names(&mut self) -> QuiverResult<&[String]> {
        if self.names.is_none() {
            self.names = Some(self.dataset.column_names()?);
        }
        Ok(self.names.as_deref().unwrap_or_default())
    }

    fn names_and_dtypes(&mut self) -> QuiverResult<(&[String], &HashMap<String, DType>)> {
        self.column_names()?;
        if self.dtypes.is_none() {
            let schema = self.dataset.schema()?;
            let dtypes = schema
                .iter()
                .map(|(name, dtype)| (name.to_string(), dtype.clone()))
                .collect();
            self.dtypes = Some(dtypes);
        }
        match (&self.names, &self.dtypes) {
            (Some(names), Some(dtypes)) => Ok((names, dtypes)),
            _ => Err(QuiverError::internal("selection scope was not populated")),
        }
    }
}

/// A deferred, dataset-independent column selection rule.
///
/// Built by [`crate::SelectorNamespace`] and combined with `-`, `|`, `&` and
/// `!`. Combining with anything that is not a selector degrades to an
/// [`Expr`].
#[derive(Debug, Clone)]
pub struct Selector {
    node: Arc<SelectorNode>,
    label: &'static str,
    context: SelectorContext,
}

impl Selector {
    pub(crate) fn from_node(node: SelectorNode, context: SelectorContext) -> Self {
        Self {
            node: Arc::new(node),
            label: SELECTOR_FUNCTION_NAME,
            context,
        }
    }

    /// The rule tree.
    pub fn node(&self) -> &SelectorNode {
        &self.node
    }

    /// Diagnostic label.
    pub fn label(&self) -> &str {
        self.label
    }

    /// Context the selector was built with.
    pub fn context(&self) -> SelectorContext {
        self.context
    }

    /// Combine with another selector.
    ///
    /// The result keeps the left operand's context.
    #[must_use]
    pub fn combine(&self, op: SetOp, rhs: &Self) -> Self {
        Self {
            node: Arc::new(SelectorNode::Combine {
                op,
                left: Arc::clone(&self.node),
                right: Arc::clone(&rhs.node),
            }),
            label: self.label,
            context: self.context,
        }
    }

    /// Every column this selector does not select.
    #[must_use]
    pub fn complement(&self) -> Self {
        Self::from_node(SelectorNode::All, self.context).combine(SetOp::Difference, self)
    }

    /// Names of the selected columns, in output order.
    pub fn select_names(&self, dataset: &dyn Dataset) -> QuiverResult<Vec<String>> {
        let mut scope = SelectionScope::new(dataset, self.context.trace_selections);
        let names = self.node.select(&mut scope)?;
        debug!("{} selected {names:?}", self.label);
        Ok(names)
    }

    /// Column handles of the selected columns, in output order.
    pub fn evaluate(&self, dataset: &dyn Dataset) -> QuiverResult<Vec<Column>> {
        self.select_names(dataset)?
            .iter()
            .map(|name| dataset.get_column(name))
            .collect()
    }

    /// Identity metadata stamped on the degraded expression.
    pub fn meta(&self) -> ExprMeta {
        ExprMeta::new(
            self.label,
            self.context.backend_version,
            self.context.version,
        )
    }

    /// Degrade to a plain multi-output expression.
    ///
    /// The expression evaluates to the same columns but has no selector
    /// algebra.
    pub fn to_expr(&self) -> Expr {
        Expr::columns(Arc::new(self.clone()), self.meta())
    }
}

impl ColumnSource for Selector {
    fn columns(&self, dataset: &dyn Dataset) -> QuiverResult<Vec<Column>> {
        self.evaluate(dataset)
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Selector({}, rule={})", self.meta(), self.node)
    }
}
