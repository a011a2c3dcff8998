//! Dataset access for column selection.
//!
//! Selectors never look at column contents. They read the ordered column
//! names and the schema of a [`Dataset`], then fetch [`Column`] handles by
//! name. Both reads happen at evaluation time.

use arrow::array::{Array, ArrayRef};
use arrow::record_batch::RecordBatch;
use common_error::{QuiverError, QuiverResult};

use crate::schema::Schema;
use crate::types::DType;

/// Handle to one column of a dataset.
///
/// Cloning a handle clones an `Arc`, never the column data.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    data: ArrayRef,
}

impl Column {
    /// Create a column handle.
    pub fn new(name: impl Into<String>, data: ArrayRef) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Column name, unique within its dataset.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The backing arrow array.
    pub fn data(&self) -> &ArrayRef {
        &self.data
    }

    /// Consume the handle, returning the backing array.
    pub fn into_data(self) -> ArrayRef {
        self.data
    }

    /// Logical dtype of the backing array.
    pub fn dtype(&self) -> DType {
        DType::from_arrow(self.data.data_type())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Same data under a different name.
    #[must_use]
    pub fn rename(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: self.data,
        }
    }
}

/// A tabular dataset whose schema is read lazily.
///
/// Implementations must not change state when these methods are called.
/// Errors they return are passed through by selectors unchanged.
pub trait Dataset {
    /// Column names in left-to-right order.
    fn column_names(&self) -> QuiverResult<Vec<String>>;

    /// Name → dtype mapping, in column order.
    fn schema(&self) -> QuiverResult<Schema>;

    /// Fetch a column handle by name.
    fn get_column(&self, name: &str) -> QuiverResult<Column>;

    /// Number of rows, if known without computation.
    fn num_rows(&self) -> Option<usize> {
        None
    }
}

impl Dataset for RecordBatch {
    fn column_names(&self) -> QuiverResult<Vec<String>> {
        Ok(self
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect())
    }

    fn schema(&self) -> QuiverResult<Schema> {
        Ok(Schema::from_arrow(&RecordBatch::schema(self)))
    }

    fn get_column(&self, name: &str) -> QuiverResult<Column> {
        self.column_by_name(name)
            .map(|data| Column::new(name, data.clone()))
            .ok_or_else(|| QuiverError::column_not_found(name))
    }

    fn num_rows(&self) -> Option<usize> {
        Some(RecordBatch::num_rows(self))
    }
}
