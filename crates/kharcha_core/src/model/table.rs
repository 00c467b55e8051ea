//! The trial-by-category result table
//!
//! Rows are independent simulated trials, columns are expense categories.
//! Components each produce one table; the orchestrator concatenates them
//! horizontally. Column storage is allocated once at the configured trial
//! count and never resized.

use crate::error::TableError;

#[derive(Debug, Clone, PartialEq)]
struct Column {
    name: String,
    values: Vec<f64>,
}

/// A 2D numeric table: `rows` trials by one column per expense category.
///
/// Column names are unique; every column holds exactly `rows` values.
/// Tables are immutable once returned from a run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialTable {
    rows: usize,
    columns: Vec<Column>,
}

impl TrialTable {
    /// An empty table with a fixed row count, ready for columns
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            columns: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Append a column, rejecting duplicate names and mismatched lengths
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), TableError> {
        let name = name.into();
        if self.columns.iter().any(|c| c.name == name) {
            return Err(TableError::DuplicateColumn(name));
        }
        if values.len() != self.rows {
            return Err(TableError::ColumnLengthMismatch {
                column: name,
                expected: self.rows,
                actual: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Append a column holding the same value in every row
    pub fn push_broadcast_column(
        &mut self,
        name: impl Into<String>,
        value: f64,
    ) -> Result<(), TableError> {
        self.push_column(name, vec![value; self.rows])
    }

    /// Column-wise concatenation. Both tables must have the same row count
    /// and disjoint column names.
    pub fn hconcat(mut self, other: TrialTable) -> Result<TrialTable, TableError> {
        for column in other.columns {
            self.push_column(column.name, column.values)?;
        }
        Ok(self)
    }

    /// Per-trial sum across all columns
    pub fn row_totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.rows];
        for column in &self.columns {
            for (total, value) in totals.iter_mut().zip(&column.values) {
                *total += value;
            }
        }
        totals
    }

    /// Iterate `(name, values)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.values.as_slice()))
    }
}
