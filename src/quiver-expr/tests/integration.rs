//! Integration tests for quiver-expr
//!
//! Multi-output expressions driven by a deferred `ColumnSource`.

use std::sync::Arc;

use arrow::array::{Array, Float64Array, Int64Array};
use common_config::{ApiVersion, BackendVersion};
use common_error::{QuiverError, QuiverResult};
use quiver_core::testing::mixed_batch;
use quiver_core::{Column, Dataset};
use quiver_expr::frame::project;
use quiver_expr::{ColumnSource, Expr, ExprEvaluator, ExprMeta, col};

/// Selects every column whose name is listed, in dataset order.
#[derive(Debug)]
struct NamedColumns(Vec<&'static str>);

impl std::fmt::Display for NamedColumns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "named{:?}", self.0)
    }
}

impl ColumnSource for NamedColumns {
    fn columns(&self, dataset: &dyn Dataset) -> QuiverResult<Vec<Column>> {
        dataset
            .column_names()?
            .iter()
            .filter(|name| self.0.contains(&name.as_str()))
            .map(|name| dataset.get_column(name))
            .collect()
    }
}

fn multi(names: Vec<&'static str>) -> Expr {
    Expr::columns(
        Arc::new(NamedColumns(names)),
        ExprMeta::new("named_columns", BackendVersion::ARROW, ApiVersion::Main),
    )
}

#[test]
fn test_binary_broadcasts_over_left_outputs() {
    let batch = mixed_batch();
    let columns = ExprEvaluator::new()
        .evaluate(&(multi(vec!["c", "a"]) - 1i64), &batch)
        .unwrap();

    let names: Vec<_> = columns.iter().map(Column::name).collect();
    assert_eq!(names, vec!["a", "c"]);

    let a = columns[0].data().as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(a.values().to_vec(), vec![0, 1, 2]);
    let c = columns[1].data().as_any().downcast_ref::<Float64Array>().unwrap();
    assert_eq!(c.values().to_vec(), vec![3.0, 4.0, 5.0]);
}

#[test]
fn test_chained_composition_keeps_broadcasting() {
    let batch = mixed_batch();
    let expr = (multi(vec!["a", "c"]) - 1i64) * 2i64;
    let columns = ExprEvaluator::new().evaluate(&expr, &batch).unwrap();

    assert_eq!(columns.len(), 2);
    assert_eq!(expr.meta().unwrap().function_name, "named_columns");
}

#[test]
fn test_multi_output_rhs_is_rejected() {
    let batch = mixed_batch();
    let err = ExprEvaluator::new()
        .evaluate(&(col("a") - multi(vec!["a", "c"])), &batch)
        .unwrap_err();
    assert!(matches!(err, QuiverError::NotImplemented(_)));
}

#[test]
fn test_alias_requires_single_output() {
    let batch = mixed_batch();
    let err = ExprEvaluator::new()
        .evaluate(&multi(vec!["a", "c"]).alias("x"), &batch)
        .unwrap_err();
    assert!(err.is_not_implemented());
}

#[test]
fn test_project_multi_output_and_named() {
    let batch = mixed_batch();
    let result = project(
        &batch,
        &[multi(vec!["a", "c"]) * 10i64],
        &[("b_copy", col("b"))],
    )
    .unwrap();

    let names: Vec<_> = result
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    assert_eq!(names, vec!["a", "c", "b_copy"]);

    let err = project(&batch, &[], &[("both", multi(vec!["a", "c"]))]).unwrap_err();
    assert!(matches!(err, QuiverError::ValueError(_)));
}
