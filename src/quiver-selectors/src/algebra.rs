//! Operators between selectors and everything else.
//!
//! Two selectors combine into a selector. A selector combined with any other
//! operand first degrades to an [`Expr`] and the expression engine takes
//! over. A non-selector on the left of a selector is never supported.

use std::ops::{Add, BitAnd, BitOr, Div, Mul, Not, Sub};

use common_error::{QuiverError, QuiverResult};
use quiver_expr::{BinaryOp, Expr};

use crate::selector::{Selector, SetOp};

impl SetOp {
    /// Expression operator used once a selector has degraded.
    pub const fn binary_op(&self) -> BinaryOp {
        match self {
            Self::Difference => BinaryOp::Subtract,
            Self::Union => BinaryOp::Or,
            Self::Intersection => BinaryOp::And,
        }
    }
}

/// Either side of a selector operation, when it is only known at runtime.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A selector; keeps the set algebra.
    Selector(Selector),
    /// Anything else, already an expression.
    Expr(Expr),
}

impl Operand {
    /// Check if this operand is a selector.
    pub const fn is_selector(&self) -> bool {
        matches!(self, Self::Selector(_))
    }

    /// The operand as an expression, degrading a selector.
    pub fn into_expr(self) -> Expr {
        match self {
            Self::Selector(selector) => selector.to_expr(),
            Self::Expr(expr) => expr,
        }
    }

    /// Apply `op` with `self` on the left.
    pub fn apply(self, op: SetOp, rhs: impl Into<Self>) -> QuiverResult<Self> {
        match (self, rhs.into()) {
            (Self::Selector(lhs), rhs) => Ok(lhs.apply(op, rhs)),
            (Self::Expr(lhs), Self::Expr(rhs)) => {
                Ok(Self::Expr(Expr::binary(lhs, op.binary_op(), rhs)))
            }
            (Self::Expr(lhs), Self::Selector(_)) => Err(reflected(op, &lhs)),
        }
    }

    /// `self - rhs`.
    pub fn difference(self, rhs: impl Into<Self>) -> QuiverResult<Self> {
        self.apply(SetOp::Difference, rhs)
    }

    /// `self | rhs`.
    pub fn union(self, rhs: impl Into<Self>) -> QuiverResult<Self> {
        self.apply(SetOp::Union, rhs)
    }

    /// `self & rhs`.
    pub fn intersection(self, rhs: impl Into<Self>) -> QuiverResult<Self> {
        self.apply(SetOp::Intersection, rhs)
    }
}

impl From<Selector> for Operand {
    fn from(selector: Selector) -> Self {
        Self::Selector(selector)
    }
}

impl From<Expr> for Operand {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

macro_rules! impl_literal_into_operand {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Self::Expr(Expr::from(value))
                }
            }
        )*
    };
}

impl_literal_into_operand!(bool, i32, i64, f64, String, &str);

fn reflected(op: SetOp, lhs: &impl std::fmt::Display) -> QuiverError {
    QuiverError::unsupported_operator(format!("{lhs} {op} Selector"))
}

impl Selector {
    /// Apply `op` with `self` on the left.
    ///
    /// A selector operand keeps the set algebra; anything else degrades.
    pub fn apply(&self, op: SetOp, rhs: impl Into<Operand>) -> Operand {
        match rhs.into() {
            Operand::Selector(rhs) => Operand::Selector(self.combine(op, &rhs)),
            Operand::Expr(rhs) => Operand::Expr(Expr::binary(self.to_expr(), op.binary_op(), rhs)),
        }
    }

    /// `self - rhs`.
    pub fn difference(&self, rhs: impl Into<Operand>) -> Operand {
        self.apply(SetOp::Difference, rhs)
    }

    /// `self | rhs`.
    pub fn union(&self, rhs: impl Into<Operand>) -> Operand {
        self.apply(SetOp::Union, rhs)
    }

    /// `self & rhs`.
    pub fn intersection(&self, rhs: impl Into<Operand>) -> Operand {
        self.apply(SetOp::Intersection, rhs)
    }

    /// `other - self`; never supported.
    pub fn rsub(&self, other: impl Into<Operand>) -> QuiverResult<Operand> {
        Err(reflected_operand(SetOp::Difference, other.into()))
    }

    /// `other & self`; never supported.
    pub fn rand(&self, other: impl Into<Operand>) -> QuiverResult<Operand> {
        Err(reflected_operand(SetOp::Intersection, other.into()))
    }

    /// `other | self`; never supported.
    pub fn ror(&self, other: impl Into<Operand>) -> QuiverResult<Operand> {
        Err(reflected_operand(SetOp::Union, other.into()))
    }
}

fn reflected_operand(op: SetOp, lhs: Operand) -> QuiverError {
    match lhs {
        Operand::Selector(selector) => reflected(op, &selector),
        Operand::Expr(expr) => reflected(op, &expr),
    }
}

macro_rules! impl_selector_ops {
    ($(($trait:ident, $method:ident, $op:expr)),*) => {
        $(
            impl $trait<Selector> for Selector {
                type Output = Selector;

                fn $method(self, rhs: Selector) -> Selector {
                    self.combine($op, &rhs)
                }
            }

            impl $trait<Expr> for Selector {
                type Output = Expr;

                fn $method(self, rhs: Expr) -> Expr {
                    Expr::binary(self.to_expr(), $op.binary_op(), rhs)
                }
            }

            impl_selector_ops!(@literal $trait, $method, $op, bool, i32, i64, f64, String);

            impl<'a> $trait<&'a str> for Selector {
                type Output = Expr;

                fn $method(self, rhs: &'a str) -> Expr {
                    Expr::binary(self.to_expr(), $op.binary_op(), Expr::from(rhs))
                }
            }
        )*
    };
    (@literal $trait:ident, $method:ident, $op:expr, $($ty:ty),*) => {
        $(
            impl $trait<$ty> for Selector {
                type Output = Expr;

                fn $method(self, rhs: $ty) -> Expr {
                    Expr::binary(self.to_expr(), $op.binary_op(), Expr::from(rhs))
                }
            }
        )*
    };
}

impl_selector_ops!(
    (Sub, sub, SetOp::Difference),
    (BitOr, bitor, SetOp::Union),
    (BitAnd, bitand, SetOp::Intersection)
);

// Arithmetic has no set meaning; a selector always degrades first.
macro_rules! impl_degrading_ops {
    ($(($trait:ident, $method:ident)),*) => {
        $(
            impl $trait<Expr> for Selector {
                type Output = Expr;

                fn $method(self, rhs: Expr) -> Expr {
                    self.to_expr().$method(rhs)
                }
            }

            impl_degrading_ops!(@literal $trait, $method, bool, i32, i64, f64, String);

            impl<'a> $trait<&'a str> for Selector {
                type Output = Expr;

                fn $method(self, rhs: &'a str) -> Expr {
                    self.to_expr().$method(rhs)
                }
            }
        )*
    };
    (@literal $trait:ident, $method:ident, $($ty:ty),*) => {
        $(
            impl $trait<$ty> for Selector {
                type Output = Expr;

                fn $method(self, rhs: $ty) -> Expr {
                    self.to_expr().$method(rhs)
                }
            }
        )*
    };
}

impl_degrading_ops!((Add, add), (Mul, mul), (Div, div));

impl Not for Selector {
    type Output = Selector;

    fn not(self) -> Selector {
        self.complement()
    }
}
