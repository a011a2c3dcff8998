//! Quiver - dtype-driven column selectors over arrow data
//!
//! Quiver picks the columns of a dataset by dtype with deferred, composable
//! selectors, and hands them to a per-column expression engine when they are
//! combined with anything else.
//!
//! ```
//! use quiver::core::testing::mixed_batch;
//! use quiver::expr::ExprEvaluator;
//! use quiver::selectors::SelectorNamespace;
//!
//! let cs = SelectorNamespace::default();
//! let batch = mixed_batch();
//!
//! let picked = (cs.numeric() | cs.string()).select_names(&batch).unwrap();
//! assert_eq!(picked, vec!["a", "c", "b"]);
//!
//! let shifted = ExprEvaluator::new()
//!     .evaluate(&(cs.numeric() - 1i64), &batch)
//!     .unwrap();
//! assert_eq!(shifted.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Re-export core crates
pub use common_config as config;
pub use common_error as error;
pub use quiver_core as core;
pub use quiver_expr as expr;
pub use quiver_selectors as selectors;

/// Quiver version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
