//! Materializing expressions into record batches.

use std::sync::Arc;

use arrow::array::{ArrayRef, UInt32Array};
use arrow::datatypes::{Field, Schema as ArrowSchema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use common_error::{QuiverError, QuiverResult};

use crate::eval::ExprEvaluator;
use crate::expr::Expr;

/// Evaluate expressions against a batch and collect the outputs.
///
/// Every output of `exprs` becomes a column named after that output; each
/// `named` expression must produce exactly one column and takes the given
/// name. An output whose name was already produced replaces the earlier
/// column in place.
pub fn project(
    batch: &RecordBatch,
    exprs: &[Expr],
    named: &[(&str, Expr)],
) -> QuiverResult<RecordBatch> {
    let evaluator = ExprEvaluator::new();
    let mut outputs: Vec<(String, ArrayRef)> = Vec::new();

    for expr in exprs {
        for column in evaluator.evaluate(expr, batch)? {
            let name = column.name().to_string();
            upsert(&mut outputs, name, column.into_data());
        }
    }

    for (name, expr) in named {
        let mut columns = evaluator.evaluate(expr, batch)?;
        if columns.len() != 1 {
            return Err(QuiverError::value_error(format!(
                "named expression '{name}' must return a single column, got {}",
                columns.len()
            )));
        }
        if let Some(column) = columns.pop() {
            upsert(&mut outputs, (*name).to_string(), column.into_data());
        }
    }

    let fields: Vec<Field> = outputs
        .iter()
        .map(|(name, array)| Field::new(name, array.data_type().clone(), true))
        .collect();
    let arrays = outputs.into_iter().map(|(_, array)| array).collect();
    let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(ArrowSchema::new(fields)),
        arrays,
        &options,
    )?)
}

/// Prepend a 0-based `UInt32` row index column.
pub fn with_row_index(batch: &RecordBatch, name: &str) -> QuiverResult<RecordBatch> {
    let schema = batch.schema();
    if schema.column_with_name(name).is_some() {
        return Err(QuiverError::schema_error(format!(
            "cannot add row index '{name}': column already exists"
        )));
    }

    let num_rows = u32::try_from(batch.num_rows()).map_err(|_| {
        QuiverError::value_error(format!(
            "row index overflows UInt32 for {} rows",
            batch.num_rows()
        ))
    })?;
    let index: ArrayRef = Arc::new(UInt32Array::from_iter_values(0..num_rows));

    let mut fields = vec![Arc::new(Field::new(name, index.data_type().clone(), false))];
    fields.extend(schema.fields().iter().cloned());
    let mut columns = vec![index];
    columns.extend(batch.columns().iter().cloned());

    Ok(RecordBatch::try_new(
        Arc::new(ArrowSchema::new(fields)),
        columns,
    )?)
}

fn upsert(outputs: &mut Vec<(String, ArrayRef)>, name: String, array: ArrayRef) {
    match outputs.iter_mut().find(|(existing, _)| *existing == name) {
        Some(slot) => slot.1 = array,
        None => outputs.push((name, array)),
    }
}

#[cfg(test)]
mod tests {
    use arrow::array::{Array, Int64Array};

    use super::*;
    use crate::expr::{col, lit};
    use quiver_core::testing::mixed_batch;

    #[test]
    fn test_project_exprs_and_named() {
        let batch = mixed_batch();
        let result = project(
            &batch,
            &[col("b"), col("a") + 10i64],
            &[("flag", col("c").gt(4.5))],
        )
        .unwrap();

        let names: Vec<_> = result
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, vec!["b", "a", "flag"]);
        assert_eq!(result.num_rows(), 3);
    }

    #[test]
    fn test_project_later_output_replaces_earlier() {
        let batch = mixed_batch();
        let result = project(&batch, &[col("a"), col("b"), col("a") * 2i64], &[]).unwrap();

        assert_eq!(result.num_columns(), 2);
        let a = result
            .column(0)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(a.values().to_vec(), vec![2, 4, 6]);
    }

    #[test]
    fn test_named_expression_errors_pass_through() {
        let batch = mixed_batch();
        let err = project(&batch, &[], &[("x", col("nope"))]).unwrap_err();
        assert!(matches!(err, QuiverError::ColumnNotFound(_)));

        let ok = project(&batch, &[], &[("seven", lit(7i64))]).unwrap();
        assert_eq!(ok.num_columns(), 1);
    }

    #[test]
    fn test_project_nothing_keeps_row_count() {
        let batch = mixed_batch();
        let result = project(&batch, &[], &[]).unwrap();
        assert_eq!(result.num_columns(), 0);
        assert_eq!(result.num_rows(), 3);
    }

    #[test]
    fn test_with_row_index() {
        let batch = mixed_batch();
        let indexed = with_row_index(&batch, "idx").unwrap();

        assert_eq!(indexed.num_columns(), 4);
        assert_eq!(indexed.schema().field(0).name(), "idx");
        let idx = indexed
            .column(0)
            .as_any()
            .downcast_ref::<UInt32Array>()
            .unwrap();
        assert_eq!(idx.values().to_vec(), vec![0, 1, 2]);

        let err = with_row_index(&indexed, "idx").unwrap_err();
        assert!(matches!(err, QuiverError::SchemaError(_)));
    }
}
