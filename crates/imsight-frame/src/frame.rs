//! Column-oriented in-memory dataset

use crate::error::{FrameError, FrameResult};
use crate::group::GroupedFrame;
use crate::schema::{ColumnDescriptor, DataColumn, DataSchema};
use crate::value::Value;

/// An ordered collection of rows stored as named, equal-length columns
#[derive(Debug, Clone, Default)]
pub struct Frame {
    schema: DataSchema,
    columns: Vec<DataColumn>,
}

impl Frame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, builder style
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        data: impl Into<DataColumn>,
    ) -> FrameResult<Self> {
        self.add_column(name, data)?;
        Ok(self)
    }

    /// Add a column
    ///
    /// The first column fixes the row count; every later column must match it.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        data: impl Into<DataColumn>,
    ) -> FrameResult<()> {
        let name = name.into();
        let data = data.into();

        if self.schema.column_index(&name).is_some() {
            return Err(FrameError::DuplicateColumn(name));
        }

        if self.columns.is_empty() {
            self.schema.num_records = data.len();
        } else if data.len() != self.schema.num_records {
            return Err(FrameError::LengthMismatch {
                column: name,
                expected: self.schema.num_records,
                actual: data.len(),
            });
        }

        self.schema
            .columns
            .push(ColumnDescriptor::new(name, data.dtype()));
        self.columns.push(data);
        Ok(())
    }

    /// Get the schema
    pub fn schema(&self) -> &DataSchema {
        &self.schema
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.schema.num_records
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Check if the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> Vec<&str> {
        self.schema.column_names()
    }

    /// Check whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.schema.column_index(name).is_some()
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> FrameResult<&DataColumn> {
        self.schema
            .column_index(name)
            .map(|idx| &self.columns[idx])
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    /// Get a numeric column as f64 values
    pub fn numeric_column(&self, name: &str) -> FrameResult<Vec<f64>> {
        let column = self.column(name)?;
        column.to_f64().ok_or_else(|| FrameError::TypeMismatch {
            column: name.to_string(),
            expected: "numeric".to_string(),
            actual: column.dtype(),
        })
    }

    /// Get a single cell
    pub fn value(&self, name: &str, row: usize) -> FrameResult<Value> {
        Ok(self.column(name)?.value(row))
    }

    /// Partition rows by the values of one or more key columns
    pub fn group_by(&self, keys: &[&str]) -> FrameResult<GroupedFrame<'_>> {
        GroupedFrame::new(self, keys)
    }
}
