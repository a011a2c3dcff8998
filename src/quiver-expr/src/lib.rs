//! Generic per-column expression engine for Quiver.
//!
//! `quiver-expr` is where selectors go when they are combined with anything
//! that is not a selector. It provides:
//!
//! - **Expressions**: an `Expr` tree with arithmetic, comparison and logical
//!   operator overloads
//! - **Deferred sources**: `ColumnSource`, the seam through which a degraded
//!   selector keeps producing its columns
//! - **Evaluation**: `ExprEvaluator`, backed by arrow compute kernels
//! - **Projection**: `frame::project` and `frame::with_row_index`

pub mod eval;
pub mod expr;
pub mod frame;

pub use eval::ExprEvaluator;
pub use expr::{BinaryOp, ColumnSource, Expr, ExprMeta, col, lit};
