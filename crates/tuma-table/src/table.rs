//! In-memory table implementing [`RowSink`].

use std::collections::HashMap;
use std::fmt;

use tracing::debug;
use tuma_core::{Result, RowSink, SlotRef, TupleError, Value};

use crate::column::Column;

/// A named, append-only set of typed columns.
///
/// Columns are bound to producer buffers when declared; every
/// [`append_row`](RowSink::append_row) snapshots all buffers into a new row.
/// The column set is fixed once the first row exists.
#[derive(Debug)]
pub struct Table {
    name: String,
    title: String,
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    rows: usize,
}

impl Table {
    /// Create an empty table.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            columns: Vec::new(),
            index: HashMap::new(),
            rows: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of committed rows.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of declared columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Whether no row has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Declared columns, in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Declared column names, in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Look up a column by its full name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&idx| &self.columns[idx])
    }

    /// Committed value of column `name` at `row`.
    pub fn value(&self, name: &str, row: usize) -> Option<Value> {
        self.column(name)?.get(row)
    }

    /// Committed value widened to `f64`.
    pub fn get_f64(&self, name: &str, row: usize) -> Option<f64> {
        self.value(name, row).map(|value| value.as_f64())
    }

    /// All values of one committed row.
    pub fn row(&self, index: usize) -> Option<Entry<'_>> {
        if index >= self.rows {
            return None;
        }
        let values = self
            .columns
            .iter()
            .filter_map(|column| column.get(index).map(|value| (column.name(), value)))
            .collect();
        Some(Entry { index, values })
    }

    /// Iterate over committed rows.
    pub fn rows(&self) -> impl Iterator<Item = Entry<'_>> {
        (0..self.rows).filter_map(|index| self.row(index))
    }
}

impl RowSink for Table {
    fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn declare_column(&mut self, name: &str, binding: SlotRef) -> Result<()> {
        if self.rows > 0 {
            return Err(TupleError::columns_frozen(name, self.rows));
        }
        if self.has_column(name) {
            return Err(TupleError::duplicate_column(name));
        }
        debug!(
            table = %self.name,
            column = name,
            column_type = %binding.column_type(),
            "declared column"
        );
        self.index.insert(name.to_string(), self.columns.len());
        self.columns.push(Column::new(name, binding));
        Ok(())
    }

    fn append_row(&mut self) -> Result<()> {
        // Each column's storage is typed from its own binding.
        for column in &mut self.columns {
            column.record()?;
        }
        self.rows += 1;
        Ok(())
    }
}

/// One committed row, as column name / value pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<'a> {
    pub index: usize,
    pub values: Vec<(&'a str, Value)>,
}

impl Entry<'_> {
    /// Value of column `name` in this row.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values
            .iter()
            .find(|(column, _)| *column == name)
            .map(|&(_, value)| value)
    }
}

impl fmt::Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "======> EVENT:{}", self.index)?;
        for (name, value) in &self.values {
            writeln!(f, " {name:<16} = {value}")?;
        }
        Ok(())
    }
}
