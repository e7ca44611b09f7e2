//! Schema and column types for data representation

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Schema describing the structure of a frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSchema {
    /// Column descriptors, in insertion order
    pub columns: Vec<ColumnDescriptor>,

    /// Number of records
    pub num_records: usize,
}

impl DataSchema {
    /// Create a new schema
    pub fn new(columns: Vec<ColumnDescriptor>, num_records: usize) -> Self {
        Self {
            columns,
            num_records,
        }
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

/// Descriptor for a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Data type
    pub dtype: ColumnType,
}

impl ColumnDescriptor {
    /// Create a new column descriptor
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Float64,
    Int64,
    Bool,
    String,
}

impl ColumnType {
    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Float64 | ColumnType::Int64)
    }

    /// Short lowercase name used in messages
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Float64 => "float64",
            ColumnType::Int64 => "int64",
            ColumnType::Bool => "bool",
            ColumnType::String => "string",
        }
    }
}

/// A column of data
///
/// Missing numeric values are stored as `NaN` in `Float64` columns.
#[derive(Debug, Clone, PartialEq)]
pub enum DataColumn {
    Float64(Vec<f64>),
    Int64(Vec<i64>),
    Bool(Vec<bool>),
    String(Vec<String>),
}

impl DataColumn {
    /// Get the column type
    pub fn dtype(&self) -> ColumnType {
        match self {
            DataColumn::Float64(_) => ColumnType::Float64,
            DataColumn::Int64(_) => ColumnType::Int64,
            DataColumn::Bool(_) => ColumnType::Bool,
            DataColumn::String(_) => ColumnType::String,
        }
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        match self {
            DataColumn::Float64(v) => v.len(),
            DataColumn::Int64(v) => v.len(),
            DataColumn::Bool(v) => v.len(),
            DataColumn::String(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to f64 (for numeric types)
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            DataColumn::Float64(v) => Some(v.clone()),
            DataColumn::Int64(v) => Some(v.iter().map(|&x| x as f64).collect()),
            _ => None,
        }
    }

    /// Scalar value at a row, `Value::Null` for NaN or out of range
    pub fn value(&self, row: usize) -> Value {
        match self {
            DataColumn::Float64(v) => v.get(row).map_or(Value::Null, |&x| Value::from(x)),
            DataColumn::Int64(v) => v.get(row).map_or(Value::Null, |&x| Value::Int(x)),
            DataColumn::Bool(v) => v.get(row).map_or(Value::Null, |&x| Value::Bool(x)),
            DataColumn::String(v) => v
                .get(row)
                .map_or(Value::Null, |x| Value::Str(x.clone())),
        }
    }
}

impl From<Vec<f64>> for DataColumn {
    fn from(v: Vec<f64>) -> Self {
        DataColumn::Float64(v)
    }
}

impl From<Vec<i64>> for DataColumn {
    fn from(v: Vec<i64>) -> Self {
        DataColumn::Int64(v)
    }
}

impl From<Vec<bool>> for DataColumn {
    fn from(v: Vec<bool>) -> Self {
        DataColumn::Bool(v)
    }
}

impl From<Vec<String>> for DataColumn {
    fn from(v: Vec<String>) -> Self {
        DataColumn::String(v)
    }
}

impl From<Vec<&str>> for DataColumn {
    fn from(v: Vec<&str>) -> Self {
        DataColumn::String(v.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_column_lookup() {
        let schema = DataSchema::new(
            vec![
                ColumnDescriptor::new("x", ColumnType::Float64),
                ColumnDescriptor::new("flag", ColumnType::Bool),
            ],
            100,
        );

        assert_eq!(schema.column_index("x"), Some(0));
        assert_eq!(schema.column_index("flag"), Some(1));
        assert_eq!(schema.column_index("z"), None);
        assert_eq!(schema.column_names(), vec!["x", "flag"]);
    }

    #[test]
    fn test_data_column_conversion() {
        let col = DataColumn::Int64(vec![1, 2, 3, 4, 5]);
        let f64_values = col.to_f64().unwrap();
        assert_eq!(f64_values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);

        let flags = DataColumn::Bool(vec![true, false]);
        assert!(flags.to_f64().is_none());
    }

    #[test]
    fn test_column_value_nan_is_null() {
        let col = DataColumn::Float64(vec![1.5, f64::NAN]);
        assert_eq!(col.value(0), Value::Float(1.5));
        assert_eq!(col.value(1), Value::Null);
        assert_eq!(col.value(9), Value::Null);
    }

    #[test]
    fn test_column_type_properties() {
        assert!(ColumnType::Float64.is_numeric());
        assert!(ColumnType::Int64.is_numeric());
        assert!(!ColumnType::Bool.is_numeric());
        assert!(!ColumnType::String.is_numeric());
        assert_eq!(ColumnType::String.name(), "string");
    }
}
