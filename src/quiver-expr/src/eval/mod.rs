//! Expression evaluation.
//!
//! Converts an `Expr` into column handles using arrow compute kernels.
//!
//! # Broadcasting
//!
//! An expression may have several outputs. A binary operation applies to
//! each left-hand output in turn; the right-hand side must be a literal or a
//! single-output expression of the same length.
//!
//! # Example
//!
//! ```rust
//! use quiver_core::testing::mixed_batch;
//! use quiver_expr::{ExprEvaluator, col};
//!
//! let batch = mixed_batch();
//! let columns = ExprEvaluator::new().evaluate(&(col("a") - 1i64), &batch).unwrap();
//! assert_eq!(columns[0].name(), "a");
//! ```

mod evaluator;

pub use evaluator::{ExprEvaluator, LITERAL_NAME};
