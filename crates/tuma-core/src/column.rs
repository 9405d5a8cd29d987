//! Scalar column types, values and the buffers producers fill.
//!
//! A [`Slot`] is the in-memory buffer behind one column. The producer that
//! owns it writes into it; the storage destination holds a [`SlotRef`] to the
//! same cell and reads it when a row is appended, so nothing is copied until
//! commit.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Primitive type of a declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ColumnType {
    F32,
    F64,
    I16,
    I32,
    I64,
    U32,
    Bool,
}

impl ColumnType {
    /// Single-character leaf type code (`F`, `D`, `S`, `I`, `L`, `i`, `O`).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::F32 => 'F',
            Self::F64 => 'D',
            Self::I16 => 'S',
            Self::I32 => 'I',
            Self::I64 => 'L',
            Self::U32 => 'i',
            Self::Bool => 'O',
        }
    }

    /// Rust-style type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U32 => "u32",
            Self::Bool => "bool",
        }
    }

    /// The neutral value a cleared buffer of this type holds.
    #[must_use]
    pub const fn neutral(self) -> Value {
        match self {
            Self::F32 => Value::F32(0.0),
            Self::F64 => Value::F64(0.0),
            Self::I16 => Value::I16(0),
            Self::I32 => Value::I32(0),
            Self::I64 => Value::I64(0),
            Self::U32 => Value::U32(0),
            Self::Bool => Value::Bool(false),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single scalar cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Value {
    F32(f32),
    F64(f64),
    I16(i16),
    I32(i32),
    I64(i64),
    U32(u32),
    Bool(bool),
}

impl Value {
    /// Type of the column this value belongs to.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
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

    /// Widen to `f64`. Booleans map to 0.0 / 1.0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::F32(v) => f64::from(v),
            Self::F64(v) => v,
            Self::I16(v) => f64::from(v),
            Self::I32(v) => f64::from(v),
            Self::I64(v) => v as f64,
            Self::U32(v) => f64::from(v),
            Self::Bool(v) => {
                if v {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Whether this is the neutral value of its type.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        *self == self.column_type().neutral()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Primitive types that can back a column.
///
/// Implemented for `f32`, `f64`, `i16`, `i32`, `i64`, `u32` and `bool`.
pub trait Scalar: sealed::Sealed + Copy + Default + fmt::Debug + 'static {
    /// Column type for this scalar.
    const TYPE: ColumnType;

    /// Wrap into a [`Value`].
    fn into_value(self) -> Value;

    /// Unwrap from a [`Value`] of the same type.
    fn from_value(value: Value) -> Option<Self>;

    #[doc(hidden)]
    fn bind(cell: &Rc<Cell<Self>>) -> SlotRef;
}

macro_rules! impl_scalar {
    ($ty:ty, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const TYPE: ColumnType = ColumnType::$variant;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn bind(cell: &Rc<Cell<Self>>) -> SlotRef {
                SlotRef::$variant(Rc::clone(cell))
            }
        }
    };
}

impl_scalar!(f32, F32);
impl_scalar!(f64, F64);
impl_scalar!(i16, I16);
impl_scalar!(i32, I32);
impl_scalar!(i64, I64);
impl_scalar!(u32, U32);
impl_scalar!(bool, Bool);

/// Column buffer owned by a producer.
#[derive(Debug, Default)]
pub struct Slot<T: Scalar> {
    cell: Rc<Cell<T>>,
}

impl<T: Scalar> Slot<T> {
    /// Create a buffer holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(Cell::new(value)),
        }
    }

    /// Current buffer value.
    pub fn get(&self) -> T {
        self.cell.get()
    }

    /// Overwrite the buffer.
    pub fn set(&self, value: T) {
        self.cell.set(value);
    }

    /// Reset the buffer to its neutral value.
    pub fn clear(&self) {
        self.cell.set(T::default());
    }

    /// A read handle a storage destination can keep.
    pub fn binding(&self) -> SlotRef {
        T::bind(&self.cell)
    }
}

/// Type-tagged read handle onto a [`Slot`].
#[derive(Debug, Clone)]
pub enum SlotRef {
    F32(Rc<Cell<f32>>),
    F64(Rc<Cell<f64>>),
    I16(Rc<Cell<i16>>),
    I32(Rc<Cell<i32>>),
    I64(Rc<Cell<i64>>),
    U32(Rc<Cell<u32>>),
    Bool(Rc<Cell<bool>>),
}

impl SlotRef {
    /// Read the current buffer value.
    pub fn read(&self) -> Value {
        match self {
            Self::F32(cell) => Value::F32(cell.get()),
            Self::F64(cell) => Value::F64(cell.get()),
            Self::I16(cell) => Value::I16(cell.get()),
            Self::I32(cell) => Value::I32(cell.get()),
            Self::I64(cell) => Value::I64(cell.get()),
            Self::U32(cell) => Value::U32(cell.get()),
            Self::Bool(cell) => Value::Bool(cell.get()),
        }
    }

    /// Type of the bound buffer.
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
}
