//! Per-column expression tree.
//!
//! An `Expr` may stand for several output columns at once (for example a
//! degraded selector). Binary operators broadcast over the left-hand outputs.

use std::ops::{Add, BitAnd, BitOr, Div, Mul, Not, Sub};
use std::sync::Arc;

use quiver_core::Value;

use super::{BinaryOp, ColumnSource, ExprMeta};

/// An ordinary per-column expression.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A single column referenced by name.
    Column(String),

    /// Columns produced by a deferred source.
    Columns {
        /// The deferred producer.
        source: Arc<dyn ColumnSource>,
        /// Identity metadata.
        meta: ExprMeta,
    },

    /// A literal broadcast to the dataset length.
    Literal(Value),

    /// A binary operation.
    Binary {
        /// Left operand.
        left: Box<Self>,
        /// Binary operator.
        op: BinaryOp,
        /// Right operand; must have a single output.
        right: Box<Self>,
    },

    /// Logical negation.
    Not(Box<Self>),

    /// Rename a single-output expression.
    Alias {
        /// Original expression.
        expr: Box<Self>,
        /// New output name.
        alias: String,
    },

    /// The last `n` rows; negative `n` drops the first `|n|` rows instead.
    Tail {
        /// Input expression.
        expr: Box<Self>,
        /// Row count.
        n: i64,
    },
}

impl Expr {
    /// Create a column reference.
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    /// Create a literal expression.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Wrap a deferred column source.
    pub fn columns(source: Arc<dyn ColumnSource>, meta: ExprMeta) -> Self {
        Self::Columns { source, meta }
    }

    /// Create a binary expression.
    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Rename the output of this expression.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        Self::Alias {
            expr: Box::new(self),
            alias: alias.into(),
        }
    }

    /// Keep the last `n` rows.
    #[must_use]
    pub fn tail(self, n: i64) -> Self {
        Self::Tail {
            expr: Box::new(self),
            n,
        }
    }

    /// Equality comparison.
    #[must_use]
    pub fn eq(self, other: impl Into<Self>) -> Self {
        Self::binary(self, BinaryOp::Eq, other.into())
    }

    /// Inequality comparison.
    #[must_use]
    pub fn not_eq(self, other: impl Into<Self>) -> Self {
        Self::binary(self, BinaryOp::NotEq, other.into())
    }

    /// Less than comparison.
    #[must_use]
    pub fn lt(self, other: impl Into<Self>) -> Self {
        Self::binary(self, BinaryOp::Lt, other.into())
    }

    /// Less than or equal comparison.
    #[must_use]
    pub fn lt_eq(self, other: impl Into<Self>) -> Self {
        Self::binary(self, BinaryOp::LtEq, other.into())
    }

    /// Greater than comparison.
    #[must_use]
    pub fn gt(self, other: impl Into<Self>) -> Self {
        Self::binary(self, BinaryOp::Gt, other.into())
    }

    /// Greater than or equal comparison.
    #[must_use]
    pub fn gt_eq(self, other: impl Into<Self>) -> Self {
        Self::binary(self, BinaryOp::GtEq, other.into())
    }

    /// Identity metadata, for expressions built from a deferred source.
    pub fn meta(&self) -> Option<&ExprMeta> {
        match self {
            Self::Columns { meta, .. } => Some(meta),
            Self::Binary { left, .. } => left.meta(),
            Self::Not(expr) | Self::Alias { expr, .. } | Self::Tail { expr, .. } => expr.meta(),
            Self::Column(_) | Self::Literal(_) => None,
        }
    }

    /// Whether this expression is a bare literal.
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// Shorthand for [`Expr::column`].
pub fn col(name: impl Into<String>) -> Expr {
    Expr::column(name)
}

/// Shorthand for [`Expr::literal`].
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::literal(value)
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Column(name) => write!(f, "col({name})"),
            Self::Columns { source, .. } => write!(f, "{source}"),
            Self::Literal(value) => write!(f, "lit({value})"),
            Self::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
            Self::Not(expr) => write!(f, "!{expr}"),
            Self::Alias { expr, alias } => write!(f, "{expr}.alias({alias})"),
            Self::Tail { expr, n } => write!(f, "{expr}.tail({n})"),
        }
    }
}

macro_rules! impl_literal_into_expr {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Self::Literal(Value::from(value))
                }
            }
        )*
    };
}

impl_literal_into_expr!(bool, i32, i64, f64, String, &str);

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

macro_rules! impl_binary_ops {
    ($(($trait:ident, $method:ident, $op:expr)),*) => {
        $(
            impl $trait<Expr> for Expr {
                type Output = Expr;

                fn $method(self, rhs: Expr) -> Expr {
                    Expr::binary(self, $op, rhs)
                }
            }

            impl_binary_ops!(@literal $trait, $method, $op, bool, i32, i64, f64, String);

            impl<'a> $trait<&'a str> for Expr {
                type Output = Expr;

                fn $method(self, rhs: &'a str) -> Expr {
                    Expr::binary(self, $op, Expr::from(rhs))
                }
            }
        )*
    };
    (@literal $trait:ident, $method:ident, $op:expr, $($ty:ty),*) => {
        $(
            impl $trait<$ty> for Expr {
                type Output = Expr;

                fn $method(self, rhs: $ty) -> Expr {
                    Expr::binary(self, $op, Expr::from(rhs))
                }
            }
        )*
    };
}

impl_binary_ops!(
    (Add, add, BinaryOp::Add),
    (Sub, sub, BinaryOp::Subtract),
    (Mul, mul, BinaryOp::Multiply),
    (Div, div, BinaryOp::Divide),
    (BitAnd, bitand, BinaryOp::And),
    (BitOr, bitor, BinaryOp::Or)
);

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_overloads_build_binary() {
        let expr = col("a") - 1i64;
        assert!(matches!(
            expr,
            Expr::Binary {
                op: BinaryOp::Subtract,
                ..
            }
        ));

        let expr = (col("a") * 2.0) | col("flag");
        assert!(matches!(expr, Expr::Binary { op: BinaryOp::Or, .. }));
    }

    #[test]
    fn test_display() {
        let expr = (col("price") - 1i64).alias("net");
        assert_eq!(expr.to_string(), "(col(price) - lit(1)).alias(net)");
        assert_eq!((!col("ok")).to_string(), "!col(ok)");
        assert_eq!(col("x").tail(-1).to_string(), "col(x).tail(-1)");
    }

    #[test]
    fn test_plain_columns_have_no_meta() {
        assert!(col("a").meta().is_none());
        assert!(lit(3i64).is_literal());
        assert!(!(col("a") + 1i64).is_literal());
    }

    #[test]
    fn test_comparison_builders() {
        let expr = col("age").gt_eq(18i64);
        assert!(matches!(expr, Expr::Binary { op: BinaryOp::GtEq, .. }));
    }
}
