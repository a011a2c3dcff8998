//! Testing utilities and fixtures for Quiver.
//!
//! Record batches with known schemas, shared by the unit and integration
//! tests of every crate in the workspace.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, DictionaryArray, DurationSecondArray, Float32Array,
    Float64Array, Int8Array, Int16Array, Int32Array, Int64Array, StringArray,
    TimestampMicrosecondArray, TimestampMillisecondArray, TimestampNanosecondArray, UInt8Array,
    UInt16Array, UInt32Array, UInt64Array,
};
use arrow::datatypes::{Field, Int32Type, Schema as ArrowSchema};
use arrow::record_batch::RecordBatch;

/// Build a record batch from named arrays; every column is nullable.
///
/// # Panics
///
/// Panics if the arrays have different lengths or names repeat.
pub fn batch_from(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let arrays = columns.into_iter().map(|(_, array)| array).collect();
    RecordBatch::try_new(Arc::new(ArrowSchema::new(fields)), arrays)
        .expect("fixture columns must line up")
}

/// `{a: Int64, b: String, c: Float64}` with three rows.
pub fn mixed_batch() -> RecordBatch {
    batch_from(vec![
        ("a", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
        ("b", Arc::new(StringArray::from(vec!["x", "y", "z"]))),
        ("c", Arc::new(Float64Array::from(vec![4.0, 5.0, 6.0]))),
    ])
}

/// One column per dtype family, two rows each.
///
/// Column order: `i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, str, bool,
/// cat, date, ts_ms, ts_us_utc, ts_ns_berlin, dur_s`.
pub fn wide_batch() -> RecordBatch {
    let categories: DictionaryArray<Int32Type> = vec!["lo", "hi"].into_iter().collect();
    batch_from(vec![
        ("i8", Arc::new(Int8Array::from(vec![1, 2])) as ArrayRef),
        ("i16", Arc::new(Int16Array::from(vec![1, 2]))),
        ("i32", Arc::new(Int32Array::from(vec![1, 2]))),
        ("i64", Arc::new(Int64Array::from(vec![1, 2]))),
        ("u8", Arc::new(UInt8Array::from(vec![1, 2]))),
        ("u16", Arc::new(UInt16Array::from(vec![1, 2]))),
        ("u32", Arc::new(UInt32Array::from(vec![1, 2]))),
        ("u64", Arc::new(UInt64Array::from(vec![1, 2]))),
        ("f32", Arc::new(Float32Array::from(vec![1.0, 2.0]))),
        ("f64", Arc::new(Float64Array::from(vec![1.0, 2.0]))),
        ("str", Arc::new(StringArray::from(vec!["p", "q"]))),
        ("bool", Arc::new(BooleanArray::from(vec![true, false]))),
        ("cat", Arc::new(categories)),
        ("date", Arc::new(Date32Array::from(vec![19_000, 19_001]))),
        ("ts_ms", Arc::new(TimestampMillisecondArray::from(vec![0, 1]))),
        (
            "ts_us_utc",
            Arc::new(TimestampMicrosecondArray::from(vec![0, 1]).with_timezone("UTC")),
        ),
        (
            "ts_ns_berlin",
            Arc::new(TimestampNanosecondArray::from(vec![0, 1]).with_timezone("Europe/Berlin")),
        ),
        ("dur_s", Arc::new(DurationSecondArray::from(vec![10, 20]))),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::types::{DType, TimeUnit};

    #[test]
    fn test_wide_batch_dtypes() {
        let schema = Dataset::schema(&wide_batch()).unwrap();

        assert_eq!(schema.len(), 18);
        assert_eq!(schema.dtype("cat"), Some(&DType::Categorical));
        assert_eq!(
            schema.dtype("ts_ns_berlin"),
            Some(&DType::datetime(TimeUnit::Nanosecond, Some("Europe/Berlin")))
        );
        assert_eq!(schema.dtype("dur_s"), Some(&DType::Duration(TimeUnit::Second)));
    }
}
