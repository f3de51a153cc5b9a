use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::engine::errors::{IntentError, TableError};
use crate::engine::table::column::Column;
use crate::engine::types::ScalarValue;

/// One row keyed by column name, in column order.
pub type Record = IndexMap<String, ScalarValue>;

/// An in-memory columnar table.
///
/// Columns have unique names and equal lengths. Operations never mutate a
/// table in place; they return a new one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if !seen.insert(col.name()) {
                return Err(TableError::DuplicateColumn(col.name().to_string()));
            }
        }
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(TableError::RaggedColumns {
                    column: bad.name().to_string(),
                    expected,
                    actual: bad.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Looks up a column, failing with [`IntentError::MissingColumn`].
    pub fn require_column(&self, name: &str) -> Result<&Column, IntentError> {
        self.column(name)
            .ok_or_else(|| IntentError::missing_column(name))
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&ScalarValue> {
        self.column(column)?.get(row)
    }

    /// Keeps the rows whose mask entry is `true`, preserving row order.
    pub fn filter_rows(&self, mask: &[bool]) -> Table {
        let rows: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(idx, keep)| keep.then_some(idx))
            .collect();
        self.take_rows(&rows)
    }

    pub fn take_rows(&self, rows: &[usize]) -> Table {
        Table {
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
        }
    }

    /// Keeps only the columns whose names satisfy `keep`, in table order.
    pub fn retain_columns<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&str) -> bool,
    {
        Table {
            columns: self
                .columns
                .iter()
                .filter(|c| keep(c.name()))
                .cloned()
                .collect(),
        }
    }

    /// Builds a table from row records.
    ///
    /// Column order follows first appearance across records; a record missing a
    /// column contributes `Null` to it.
    pub fn from_records(records: Vec<IndexMap<String, JsonValue>>) -> Result<Self, TableError> {
        let mut columns: IndexMap<String, Column> = IndexMap::new();
        for (row, record) in records.into_iter().enumerate() {
            for (name, value) in record {
                let cell = ScalarValue::try_from(value).map_err(|e| {
                    TableError::InvalidRecord(format!("row {row}, column '{name}': {e}"))
                })?;
                // A column first seen at `row` is backfilled with nulls
                columns
                    .entry(name.clone())
                    .or_insert_with(|| Column::new(name, vec![ScalarValue::Null; row]))
                    .push(cell);
            }
            for col in columns.values_mut() {
                while col.len() < row + 1 {
                    col.push(ScalarValue::Null);
                }
            }
        }
        Table::new(columns.into_values().collect())
    }

    /// Parses a JSON array of row objects.
    pub fn from_json_str(input: &str) -> Result<Self, TableError> {
        let records: Vec<IndexMap<String, JsonValue>> = serde_json::from_str(input)
            .map_err(|e| TableError::InvalidRecord(e.to_string()))?;
        Table::from_records(records)
    }

    pub fn to_records(&self) -> Vec<Record> {
        (0..self.row_count())
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| (c.name().to_string(), c.values()[row].clone()))
                    .collect()
            })
            .collect()
    }
}
