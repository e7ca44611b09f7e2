//! Row grouping by key columns

use std::collections::BTreeMap;

use crate::error::{FrameError, FrameResult};
use crate::frame::Frame;
use crate::schema::DataColumn;
use crate::value::Value;

/// One group: its key tuple and the row indices belonging to it
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Key values, one per key column
    pub key: Vec<Value>,
    /// Row indices in original order
    pub rows: Vec<usize>,
}

impl Group {
    /// Number of rows in the group
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the group has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A frame partitioned by one or more key columns
///
/// Groups are ordered by key tuple ascending.
#[derive(Debug, Clone)]
pub struct GroupedFrame<'a> {
    frame: &'a Frame,
    keys: Vec<String>,
    groups: Vec<Group>,
}

impl<'a> GroupedFrame<'a> {
    pub(crate) fn new(frame: &'a Frame, keys: &[&str]) -> FrameResult<Self> {
        if keys.is_empty() {
            return Err(FrameError::EmptyGroupKeys);
        }

        let key_columns = keys
            .iter()
            .map(|name| frame.column(name))
            .collect::<FrameResult<Vec<_>>>()?;

        let mut partitions: BTreeMap<Vec<Value>, Vec<usize>> = BTreeMap::new();
        for row in 0..frame.num_rows() {
            let key: Vec<Value> = key_columns.iter().map(|c| c.value(row)).collect();
            partitions.entry(key).or_default().push(row);
        }

        let groups = partitions
            .into_iter()
            .map(|(key, rows)| Group { key, rows })
            .collect();

        Ok(Self {
            frame,
            keys: keys.iter().map(|k| k.to_string()).collect(),
            groups,
        })
    }

    /// The underlying frame
    pub fn frame(&self) -> &'a Frame {
        self.frame
    }

    /// Names of the key columns
    pub fn key_columns(&self) -> &[String] {
        &self.keys
    }

    /// Groups in key order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Look up a column of the underlying frame
    pub fn column(&self, name: &str) -> FrameResult<&'a DataColumn> {
        self.frame.column(name)
    }
}
