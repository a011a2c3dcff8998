//! Column selectors for Quiver.
//!
//! A selector picks the columns of a dataset by dtype, deferred until a
//! dataset is supplied. Selectors form a closed algebra:
//!
//! - `a - b`: columns of `a` not in `b`
//! - `a | b`: columns of `a` not in `b`, then the columns of `b`
//! - `a & b`: columns of `a` also in `b`
//! - `!a`: every column not in `a`
//!
//! Combining a selector with anything else (a literal, an `Expr`) degrades it
//! to a plain multi-output `Expr`, evaluated by `quiver-expr`.

pub mod algebra;
pub mod context;
pub mod namespace;
pub mod selector;

pub use algebra::Operand;
pub use context::SelectorContext;
pub use namespace::{NUMERIC_DTYPES, SelectorNamespace};
pub use selector::{SELECTOR_FUNCTION_NAME, Selector, SelectorNode, SetOp};
