//! Storage destination boundary and column naming.

use crate::column::{ColumnType, Scalar, Slot, SlotRef};
use crate::error::{Result, TupleError};

/// Prefix character of every declared column name.
pub const COLUMN_PREFIX: char = 'f';

/// External column name for a producer sub-field.
///
/// Prefix, then the producer name verbatim, then the field name verbatim:
/// `column_name("p1", "E") == "fp1E"`.
pub fn column_name(producer: &str, field: &str) -> String {
    let mut name = String::with_capacity(1 + producer.len() + field.len());
    name.push(COLUMN_PREFIX);
    name.push_str(producer);
    name.push_str(field);
    name
}

/// A columnar storage destination rows are appended to.
///
/// Implementations keep the [`SlotRef`] handed to [`declare_column`] and read
/// it on every [`append_row`].
///
/// [`declare_column`]: RowSink::declare_column
/// [`append_row`]: RowSink::append_row
pub trait RowSink {
    /// Whether a column with this name is already declared.
    fn has_column(&self, name: &str) -> bool;

    /// Declare a named scalar column bound to a producer buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TupleError::DuplicateColumn`] if `name` is taken.
    fn declare_column(&mut self, name: &str, binding: SlotRef) -> Result<()>;

    /// Append one row from the current values of every bound buffer.
    fn append_row(&mut self) -> Result<()>;
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
    fn has_column(&self, name: &str) -> bool {
        (**self).has_column(name)
    }

    fn declare_column(&mut self, name: &str, binding: SlotRef) -> Result<()> {
        (**self).declare_column(name, binding)
    }

    fn append_row(&mut self) -> Result<()> {
        (**self).append_row()
    }
}

impl<S: RowSink + ?Sized> RowSink for Box<S> {
    fn has_column(&self, name: &str) -> bool {
        (**self).has_column(name)
    }

    fn declare_column(&mut self, name: &str, binding: SlotRef) -> Result<()> {
        (**self).declare_column(name, binding)
    }

    fn append_row(&mut self) -> Result<()> {
        (**self).append_row()
    }
}

/// Collects the columns one producer declares before they reach the sink.
///
/// Declarations are staged so a producer that fails half-way leaves nothing
/// behind in the destination.
#[derive(Debug)]
pub struct ColumnDeclarer<'a> {
    producer: &'a str,
    columns: Vec<(String, SlotRef)>,
}

impl<'a> ColumnDeclarer<'a> {
    /// Start declaring columns for the producer registered as `producer`.
    pub fn new(producer: &'a str) -> Self {
        Self {
            producer,
            columns: Vec::new(),
        }
    }

    /// Registered name of the producer.
    pub fn producer(&self) -> &str {
        self.producer
    }

    /// Declare the sub-field `field` backed by `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`TupleError::DuplicateColumn`] if this producer already
    /// declared the same field.
    pub fn declare<T: Scalar>(&mut self, field: &str, slot: &Slot<T>) -> Result<()> {
        let name = column_name(self.producer, field);
        if self.columns.iter().any(|(existing, _)| *existing == name) {
            return Err(TupleError::duplicate_column(name));
        }
        self.columns.push((name, slot.binding()));
        Ok(())
    }

    /// Declared column names and types, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.columns
            .iter()
            .map(|(name, binding)| (name.as_str(), binding.column_type()))
    }

    /// Number of staged columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Push every staged column into `sink`, checking for collisions first.
    pub(crate) fn commit<S: RowSink + ?Sized>(self, sink: &mut S) -> Result<usize> {
        if let Some((name, _)) = self.columns.iter().find(|(name, _)| sink.has_column(name)) {
            return Err(TupleError::duplicate_column(name.clone()));
        }
        let count = self.columns.len();
        for (name, binding) in self.columns {
            sink.declare_column(&name, binding)?;
        }
        Ok(count)
    }
}
