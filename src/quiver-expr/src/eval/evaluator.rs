//! Expression evaluator implementation.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray};
use arrow::compute::{self, CastOptions, kernels::boolean, kernels::cmp};
use arrow::datatypes::DataType as ArrowDataType;
use common_error::{QuiverError, QuiverResult};
use log::debug;
use quiver_core::{Column, DType, Dataset, Value};

use crate::expr::{BinaryOp, Expr, common_numeric_type};

/// Output name given to a bare literal.
pub const LITERAL_NAME: &str = "literal";

/// Expression evaluator.
///
/// Turns an `Expr` into column handles by evaluating it against a `Dataset`.
#[derive(Debug, Default)]
pub struct ExprEvaluator;

impl ExprEvaluator {
    /// Create a new expression evaluator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluate an expression against a dataset.
    ///
    /// Returns one column per expression output, in output order.
    pub fn evaluate(&self, expr: &Expr, dataset: &dyn Dataset) -> QuiverResult<Vec<Column>> {
        match expr {
            Expr::Column(name) => Ok(vec![dataset.get_column(name)?]),

            Expr::Columns { source, meta } => {
                let columns = source.columns(dataset)?;
                debug!(
                    "{} produced {} column(s): {:?}",
                    meta.function_name,
                    columns.len(),
                    columns.iter().map(Column::name).collect::<Vec<_>>()
                );
                Ok(columns)
            }

            Expr::Literal(value) => {
                let len = dataset.num_rows().unwrap_or(1);
                Ok(vec![Column::new(LITERAL_NAME, value.to_array(len))])
            }

            Expr::Binary { left, op, right } => self.eval_binary(left, *op, right, dataset),

            Expr::Not(expr) => self
                .evaluate(expr, dataset)?
                .into_iter()
                .map(|column| {
                    let result = boolean::not(as_boolean(column.data(), "NOT")?)
                        .map_err(|e| QuiverError::execution(e.to_string()))?;
                    Ok(Column::new(column.name(), Arc::new(result) as ArrayRef))
                })
                .collect(),

            Expr::Alias { expr, alias } => {
                let column = self.evaluate_single(expr, dataset)?;
                Ok(vec![column.rename(alias.as_str())])
            }

            Expr::Tail { expr, n } => Ok(self
                .evaluate(expr, dataset)?
                .into_iter()
                .map(|column| {
                    let (offset, length) = tail_bounds(column.len(), *n);
                    let data = column.data().slice(offset, length);
                    Column::new(column.name(), data)
                })
                .collect()),
        }
    }

    /// Evaluate an expression that must have exactly one output.
    pub fn evaluate_single(&self, expr: &Expr, dataset: &dyn Dataset) -> QuiverResult<Column> {
        let mut columns = self.evaluate(expr, dataset)?;
        if columns.len() != 1 {
            return Err(QuiverError::not_implemented(format!(
                "multi-output expressions are not supported in this context: {expr} produced {} columns",
                columns.len()
            )));
        }
        columns
            .pop()
            .ok_or_else(|| QuiverError::internal("single-output expression produced no column"))
    }

    /// Evaluate a binary expression, broadcasting over the left outputs.
    fn eval_binary(
        &self,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
        dataset: &dyn Dataset,
    ) -> QuiverResult<Vec<Column>> {
        let lhs = self.evaluate(left, dataset)?;

        let rhs = match right {
            Expr::Literal(value) => Comparand::Literal(value),
            other => Comparand::Column(self.evaluate_single(other, dataset)?),
        };

        lhs.into_iter()
            .map(|column| {
                let (l, r) = align_operands(column.data(), &rhs)?;
                let result = apply_op(op, &l, &r)?;
                Ok(Column::new(column.name(), result))
            })
            .collect()
    }
}

/// Right-hand side of a binary operation.
enum Comparand<'a> {
    Literal(&'a Value),
    Column(Column),
}

/// Bring both operands to the same length and a common arrow type.
fn align_operands(left: &ArrayRef, right: &Comparand<'_>) -> QuiverResult<(ArrayRef, ArrayRef)> {
    match right {
        Comparand::Literal(value) => {
            let left_dtype = DType::from_arrow(left.data_type());
            let literal = value.to_array(left.len());
            if value.is_null() {
                return Ok((Arc::clone(left), cast(&literal, left.data_type())?));
            }
            let literal_dtype = value.dtype();
            // A float literal promotes an integer column instead of truncating.
            if left_dtype.is_integer() && literal_dtype.is_float() {
                return widen(left, &left_dtype, &literal, &literal_dtype);
            }
            match cast(&literal, left.data_type()) {
                Ok(right) => Ok((Arc::clone(left), right)),
                // The literal does not fit the column type.
                Err(err) => match common_numeric_type(&left_dtype, &literal_dtype) {
                    Some(_) => widen(left, &left_dtype, &literal, &literal_dtype),
                    None => Err(err),
                },
            }
        }
        Comparand::Column(column) => {
            let right = column.data();
            if left.len() != right.len() {
                return Err(QuiverError::execution(format!(
                    "objects are not co-aligned: left has {} rows, '{}' has {}",
                    left.len(),
                    column.name(),
                    right.len()
                )));
            }
            if left.data_type() == right.data_type() {
                return Ok((Arc::clone(left), Arc::clone(right)));
            }
            let left_dtype = DType::from_arrow(left.data_type());
            let right_dtype = DType::from_arrow(right.data_type());
            if common_numeric_type(&left_dtype, &right_dtype).is_some() {
                widen(left, &left_dtype, right, &right_dtype)
            } else {
                Ok((Arc::clone(left), Arc::clone(right)))
            }
        }
    }
}

/// Cast both operands to their common numeric dtype.
fn widen(
    left: &ArrayRef,
    left_dtype: &DType,
    right: &ArrayRef,
    right_dtype: &DType,
) -> QuiverResult<(ArrayRef, ArrayRef)> {
    let target = common_numeric_type(left_dtype, right_dtype)
        .ok_or_else(|| {
            QuiverError::type_error(format!(
                "no common numeric type for {left_dtype} and {right_dtype}"
            ))
        })?
        .to_arrow()?;
    Ok((cast(left, &target)?, cast(right, &target)?))
}

/// Cast that fails on values the target cannot represent.
fn cast(array: &ArrayRef, target: &ArrowDataType) -> QuiverResult<ArrayRef> {
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    compute::cast_with_options(array, target, &options)
        .map_err(|e| QuiverError::execution(e.to_string()))
}

fn apply_op(op: BinaryOp, left: &ArrayRef, right: &ArrayRef) -> QuiverResult<ArrayRef> {
    use arrow::compute::kernels::numeric::{add, div, mul, sub};

    let exec = |e: arrow::error::ArrowError| QuiverError::execution(e.to_string());
    match op {
        BinaryOp::Add => add(left, right).map_err(exec),
        BinaryOp::Subtract => sub(left, right).map_err(exec),
        BinaryOp::Multiply => mul(left, right).map_err(exec),
        BinaryOp::Divide => div(left, right).map_err(exec),

        BinaryOp::Eq => Ok(Arc::new(cmp::eq(left, right).map_err(exec)?)),
        BinaryOp::NotEq => Ok(Arc::new(cmp::neq(left, right).map_err(exec)?)),
        BinaryOp::Lt => Ok(Arc::new(cmp::lt(left, right).map_err(exec)?)),
        BinaryOp::LtEq => Ok(Arc::new(cmp::lt_eq(left, right).map_err(exec)?)),
        BinaryOp::Gt => Ok(Arc::new(cmp::gt(left, right).map_err(exec)?)),
        BinaryOp::GtEq => Ok(Arc::new(cmp::gt_eq(left, right).map_err(exec)?)),

        BinaryOp::And => {
            let result = boolean::and_kleene(as_boolean(left, "AND")?, as_boolean(right, "AND")?)
                .map_err(exec)?;
            Ok(Arc::new(result))
        }
        BinaryOp::Or => {
            let result = boolean::or_kleene(as_boolean(left, "OR")?, as_boolean(right, "OR")?)
                .map_err(exec)?;
            Ok(Arc::new(result))
        }
    }
}

fn as_boolean<'a>(array: &'a ArrayRef, op: &str) -> QuiverResult<&'a BooleanArray> {
    array
        .as_any()
        .downcast_ref::<BooleanArray>()
        .ok_or_else(|| {
            QuiverError::type_error(format!(
                "{op} requires boolean operands, got {}",
                array.data_type()
            ))
        })
}

/// Slice bounds `(offset, length)` for `tail(n)` over `len` rows.
fn tail_bounds(len: usize, n: i64) -> (usize, usize) {
    let magnitude = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
    if n >= 0 {
        let length = magnitude.min(len);
        (len - length, length)
    } else {
        let offset = magnitude.min(len);
        (offset, len - offset)
    }
}

#[cfg(test)]
mod tests {
    use arrow::array::{Float64Array, Int64Array};

    use super::*;
    use crate::expr::{col, lit};
    use quiver_core::testing::{mixed_batch, wide_batch};

    fn int_values(column: &Column) -> Vec<i64> {
        column
            .data()
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap()
            .values()
            .to_vec()
    }

    #[test]
    fn test_column_and_literal() {
        let batch = mixed_batch();
        let evaluator = ExprEvaluator::new();

        let columns = evaluator.evaluate(&(col("a") - 1i64), &batch).unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name(), "a");
        assert_eq!(int_values(&columns[0]), vec![0, 1, 2]);

        let literal = evaluator.evaluate(&lit(7i64), &batch).unwrap();
        assert_eq!(literal[0].name(), LITERAL_NAME);
        assert_eq!(literal[0].len(), 3);
    }

    #[test]
    fn test_float_literal_promotes_integer_column() {
        let batch = mixed_batch();
        let columns = ExprEvaluator::new()
            .evaluate(&(col("a") * 0.5), &batch)
            .unwrap();

        let values = columns[0]
            .data()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(values.values().to_vec(), vec![0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_out_of_range_literal_widens_column() {
        let batch = wide_batch();
        let evaluator = ExprEvaluator::new();

        let shifted = evaluator.evaluate(&(col("i8") - 300i64), &batch).unwrap();
        assert_eq!(shifted[0].dtype(), DType::Int64);
        assert_eq!(shifted[0].data().null_count(), 0);
        assert_eq!(int_values(&shifted[0]), vec![-299, -298]);

        let shifted = evaluator.evaluate(&(col("u32") + -1i64), &batch).unwrap();
        assert_eq!(int_values(&shifted[0]), vec![0, 1]);
    }

    #[test]
    fn test_in_range_literal_keeps_column_type() {
        let batch = wide_batch();
        let columns = ExprEvaluator::new()
            .evaluate(&(col("i8") - 1i64), &batch)
            .unwrap();
        assert_eq!(columns[0].dtype(), DType::Int8);
        assert_eq!(columns[0].data().null_count(), 0);
    }

    #[test]
    fn test_uncastable_literal_errors() {
        let batch = mixed_batch();
        let err = ExprEvaluator::new()
            .evaluate(&(col("a") + "x"), &batch)
            .unwrap_err();
        assert!(matches!(err, QuiverError::ExecutionError(_)));

        let nulls = ExprEvaluator::new()
            .evaluate(&(col("a") + lit(Value::Null)), &batch)
            .unwrap();
        assert_eq!(nulls[0].data().null_count(), 3);
    }

    #[test]
    fn test_mixed_numeric_columns_widen() {
        let batch = mixed_batch();
        let columns = ExprEvaluator::new()
            .evaluate(&(col("a") + col("c")), &batch)
            .unwrap();
        assert_eq!(columns[0].dtype(), DType::Float64);
    }

    #[test]
    fn test_comparison_and_logic() {
        let batch = mixed_batch();
        let expr = col("a").gt(1i64) & col("c").lt(6.0);
        let columns = ExprEvaluator::new().evaluate(&expr, &batch).unwrap();

        let values = columns[0]
            .data()
            .as_any()
            .downcast_ref::<BooleanArray>()
            .unwrap();
        assert_eq!(
            values.iter().collect::<Vec<_>>(),
            vec![Some(false), Some(true), Some(false)]
        );
    }

    #[test]
    fn test_logic_requires_booleans() {
        let batch = mixed_batch();
        let err = ExprEvaluator::new()
            .evaluate(&(col("a") | col("c")), &batch)
            .unwrap_err();
        assert!(matches!(err, QuiverError::TypeError(_)));
    }

    #[test]
    fn test_alias_and_tail() {
        let batch = mixed_batch();
        let evaluator = ExprEvaluator::new();

        let renamed = evaluator.evaluate(&col("a").alias("z"), &batch).unwrap();
        assert_eq!(renamed[0].name(), "z");

        let last_two = evaluator.evaluate(&col("a").tail(2), &batch).unwrap();
        assert_eq!(int_values(&last_two[0]), vec![2, 3]);

        let all_but_first = evaluator.evaluate(&col("a").tail(-1), &batch).unwrap();
        assert_eq!(int_values(&all_but_first[0]), vec![2, 3]);
    }

    #[test]
    fn test_tail_bounds() {
        assert_eq!(tail_bounds(3, 2), (1, 2));
        assert_eq!(tail_bounds(3, 10), (0, 3));
        assert_eq!(tail_bounds(3, -1), (1, 2));
        assert_eq!(tail_bounds(3, -5), (3, 0));
        assert_eq!(tail_bounds(0, 0), (0, 0));
    }

    #[test]
    fn test_not_co_aligned() {
        let batch = mixed_batch();
        let err = ExprEvaluator::new()
            .evaluate(&(col("a") - col("a").tail(1)), &batch)
            .unwrap_err();
        assert!(err.to_string().contains("not co-aligned"));
    }

    #[test]
    fn test_missing_column_passes_through() {
        let batch = mixed_batch();
        let err = ExprEvaluator::new()
            .evaluate(&(col("nope") + 1i64), &batch)
            .unwrap_err();
        assert!(matches!(err, QuiverError::ColumnNotFound(_)));
    }
}
