//! Typed column storage.

use tuma_core::{ColumnType, Result, SlotRef, TupleError, Value};

/// Values committed to one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U32(Vec<u32>),
    Bool(Vec<bool>),
}

impl ColumnData {
    /// Empty storage for a column of `column_type`.
    pub fn new(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::F32 => Self::F32(Vec::new()),
            ColumnType::F64 => Self::F64(Vec::new()),
            ColumnType::I16 => Self::I16(Vec::new()),
            ColumnType::I32 => Self::I32(Vec::new()),
            ColumnType::I64 => Self::I64(Vec::new()),
            ColumnType::U32 => Self::U32(Vec::new()),
            ColumnType::Bool => Self::Bool(Vec::new()),
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::F32(_) => ColumnType::F32,
            Self::F64(_) => ColumnType::F64,
            Self::I16(_) => ColumnType::I16,
            Self::I32(_) => ColumnType::I32,
            Self::I64(_) => ColumnType::I64,
            Self::U32(_) => ColumnType::U32,
            Self::Bool(_) => ColumnType::Bool,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::I64(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `row`.
    pub fn get(&self, row: usize) -> Option<Value> {
        match self {
            Self::F32(v) => v.get(row).copied().map(Value::F32),
            Self::F64(v) => v.get(row).copied().map(Value::F64),
            Self::I16(v) => v.get(row).copied().map(Value::I16),
            Self::I32(v) => v.get(row).copied().map(Value::I32),
            Self::I64(v) => v.get(row).copied().map(Value::I64),
            Self::U32(v) => v.get(row).copied().map(Value::U32),
            Self::Bool(v) => v.get(row).copied().map(Value::Bool),
        }
    }

    /// Append `value`.
    ///
    /// # Errors
    ///
    /// Returns [`TupleError::Storage`] and stores nothing if `value` is not of
    /// this column's type.
    pub fn push(&mut self, value: Value) -> Result<()> {
        match (&mut *self, value) {
            (Self::F32(v), Value::F32(x)) => v.push(x),
            (Self::F64(v), Value::F64(x)) => v.push(x),
            (Self::I16(v), Value::I16(x)) => v.push(x),
            (Self::I32(v), Value::I32(x)) => v.push(x),
            (Self::I64(v), Value::I64(x)) => v.push(x),
            (Self::U32(v), Value::U32(x)) => v.push(x),
            (Self::Bool(v), Value::Bool(x)) => v.push(x),
            (data, value) => {
                return Err(TupleError::storage(format!(
                    "cannot store a {} value in a {} column",
                    value.column_type(),
                    data.column_type()
                )));
            }
        }
        Ok(())
    }
}

/// A declared column: its name, the buffer it reads from, and its rows.
#[derive(Debug)]
pub struct Column {
    name: String,
    binding: SlotRef,
    data: ColumnData,
}

impl Column {
    pub(crate) fn new(name: impl Into<String>, binding: SlotRef) -> Self {
        let data = ColumnData::new(binding.column_type());
        Self {
            name: name.into(),
            binding,
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    /// Committed values.
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Value at `row`.
    pub fn get(&self, row: usize) -> Option<Value> {
        self.data.get(row)
    }

    /// Snapshot the bound buffer into a new row.
    pub(crate) fn record(&mut self) -> Result<()> {
        self.data.push(self.binding.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuma_core::Slot;

    #[test]
    fn test_push_rejects_mismatched_type() {
        let mut data = ColumnData::new(ColumnType::F64);
        data.push(Value::F64(1.5)).unwrap();
        let err = data.push(Value::F32(1.5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "storage error: cannot store a f32 value in a f64 column"
        );
        assert_eq!(data.len(), 1);
        assert_eq!(data.get(0), Some(Value::F64(1.5)));
        assert_eq!(data.get(1), None);
    }

    #[test]
    fn test_record_reads_current_buffer() {
        let slot = Slot::new(3i16);
        let mut column = Column::new("fxN", slot.binding());
        assert_eq!(column.column_type(), ColumnType::I16);
        assert!(column.data().is_empty());

        column.record().unwrap();
        slot.set(-2);
        column.record().unwrap();
        assert_eq!(column.get(0), Some(Value::I16(3)));
        assert_eq!(column.get(1), Some(Value::I16(-2)));
    }
}
