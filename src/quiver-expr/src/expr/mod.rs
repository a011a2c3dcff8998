//! Expression trees.

mod binary;
mod expr;
mod meta;

pub use binary::{BinaryOp, common_numeric_type};
pub use expr::{Expr, col, lit};
pub use meta::{ColumnSource, ExprMeta};
