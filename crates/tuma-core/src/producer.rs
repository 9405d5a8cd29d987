//! Field producers and their registrations.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use crate::error::Result;
use crate::sink::ColumnDeclarer;

/// A named group of columns filled from one domain object.
///
/// This is the object-safe half the writer works with: it only needs to
/// read and reset readiness and to clear buffers. Type-specific `fill`
/// methods live on the concrete producer.
pub trait FieldProducer: Any {
    /// Whether the buffers hold valid data for the current row.
    fn is_ready(&self) -> bool;

    /// Overwrite the readiness flag.
    fn set_ready(&mut self, ready: bool);

    /// Reset every buffer to its neutral value and mark the producer ready.
    fn clear(&mut self);
}

/// Construction half of a producer: builds an instance and declares its columns.
pub trait Producer: FieldProducer + Sized {
    /// Column selection and other setup-time arguments.
    type Options;

    /// Create the producer and declare its active columns.
    ///
    /// Readiness of the returned producer must be `false`.
    ///
    /// # Errors
    ///
    /// Propagates declaration failures such as a repeated sub-field name.
    fn declare_columns(columns: &mut ColumnDeclarer<'_>, options: Self::Options) -> Result<Self>;
}

/// The writer's record of one registered producer.
pub(crate) struct Registration {
    name: String,
    producer: Box<dyn FieldProducer>,
}

impl Registration {
    pub(crate) fn new(name: String, producer: Box<dyn FieldProducer>) -> Self {
        Self { name, producer }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.producer.is_ready()
    }

    pub(crate) fn set_ready(&mut self, ready: bool) {
        self.producer.set_ready(ready);
    }

    pub(crate) fn downcast_ref<T: FieldProducer>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.producer;
        any.downcast_ref::<T>()
    }

    pub(crate) fn downcast_mut<T: FieldProducer>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = &mut *self.producer;
        any.downcast_mut::<T>()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("ready", &self.producer.is_ready())
            .finish_non_exhaustive()
    }
}

/// Typed handle to a producer owned by a [`TupleMaker`](crate::TupleMaker).
///
/// Handles are only valid for the writer that issued them.
pub struct ProducerId<T> {
    pub(crate) maker: u64,
    pub(crate) index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ProducerId<T> {
    pub(crate) fn new(maker: u64, index: usize) -> Self {
        Self {
            maker,
            index,
            _marker: PhantomData,
        }
    }

    /// Position of the producer in registration order.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for ProducerId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ProducerId<T> {}

impl<T> PartialEq for ProducerId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.maker == other.maker && self.index == other.index
    }
}

impl<T> Eq for ProducerId<T> {}

impl<T> fmt::Debug for ProducerId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProducerId")
            .field("maker", &self.maker)
            .field("index", &self.index)
            .finish()
    }
}
