//! Row writer: owns producers and gates every commit on their readiness.

use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace, warn};

use crate::error::{Result, TupleError};
use crate::producer::{FieldProducer, Producer, ProducerId, Registration};
use crate::sink::{ColumnDeclarer, RowSink};

static NEXT_MAKER_ID: AtomicU64 = AtomicU64::new(1);

/// Writer policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MakerOptions {
    /// Fail with [`TupleError::IncompleteRow`] instead of returning `false`
    /// when a producer was neither filled nor cleared (default: true).
    pub errors_fatal: bool,
}

impl Default for MakerOptions {
    fn default() -> Self {
        Self { errors_fatal: true }
    }
}

impl MakerOptions {
    /// Options that report incomplete rows as a soft `false`.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            errors_fatal: false,
        }
    }

    /// Set the incomplete-row policy.
    #[must_use]
    pub fn with_errors_fatal(mut self, fatal: bool) -> Self {
        self.errors_fatal = fatal;
        self
    }
}

/// Outcome of a completeness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    /// Every producer was ready and the row was appended.
    Committed,
    /// The row was dropped; names of the producers that were not ready.
    Incomplete(Vec<String>),
}

impl RowStatus {
    /// Whether the row reached the storage destination.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }

    /// Producers that blocked the row, empty when committed.
    pub fn missing(&self) -> &[String] {
        match self {
            Self::Committed => &[],
            Self::Incomplete(missing) => missing,
        }
    }
}

/// Assembles rows from registered producers.
///
/// For every row: [`reset`](Self::reset), fill or clear each producer, then
/// [`check_and_fill`](Self::check_and_fill). The writer owns its producers;
/// callers reach them through the [`ProducerId`] returned at registration,
/// either with [`get_mut`](Self::get_mut) or by indexing.
///
/// Column buffers are shared with the sink through `Rc`, so a writer stays on
/// the thread that built it. Use one writer per thread.
#[derive(Debug)]
pub struct TupleMaker<S> {
    sink: S,
    registrations: Vec<Registration>,
    options: MakerOptions,
    id: u64,
    rows_committed: usize,
}

impl<S: RowSink> TupleMaker<S> {
    /// Create a writer over `sink` with the default (fatal) policy.
    ///
    /// # Errors
    ///
    /// Returns [`TupleError::InvalidArgument`] when `sink` is `None`.
    pub fn new(sink: Option<S>) -> Result<Self> {
        Self::with_options(sink, MakerOptions::default())
    }

    /// Create a writer over `sink` with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`TupleError::InvalidArgument`] when `sink` is `None`.
    pub fn with_options(sink: Option<S>, options: MakerOptions) -> Result<Self> {
        let sink =
            sink.ok_or_else(|| TupleError::invalid_argument("storage destination must be given"))?;
        Ok(Self {
            sink,
            registrations: Vec::new(),
            options,
            id: NEXT_MAKER_ID.fetch_add(1, Ordering::Relaxed),
            rows_committed: 0,
        })
    }

    /// Construct a `T`, declare its columns under `name` and register it.
    ///
    /// Registration is atomic: if any column cannot be declared, the sink is
    /// left untouched and nothing is registered.
    ///
    /// # Errors
    ///
    /// - [`TupleError::InvalidArgument`] for an empty name
    /// - [`TupleError::DuplicateProducer`] if `name` is already registered
    /// - [`TupleError::DuplicateColumn`] on a column name collision
    /// - whatever the sink reports for a rejected declaration
    pub fn add_producer<T: Producer>(
        &mut self,
        name: &str,
        options: T::Options,
    ) -> Result<ProducerId<T>> {
        if name.is_empty() {
            return Err(TupleError::invalid_argument("producer name must not be empty"));
        }
        if self.registrations.iter().any(|r| r.name() == name) {
            return Err(TupleError::duplicate_producer(name));
        }

        let mut declarer = ColumnDeclarer::new(name);
        let mut producer = T::declare_columns(&mut declarer, options)?;
        let columns = declarer.commit(&mut self.sink)?;
        producer.set_ready(false);

        let index = self.registrations.len();
        self.registrations
            .push(Registration::new(name.to_string(), Box::new(producer)));
        debug!(producer = name, columns, "registered producer");
        Ok(ProducerId::new(self.id, index))
    }

    /// Register a `T` with its default options.
    pub fn add_default_producer<T>(&mut self, name: &str) -> Result<ProducerId<T>>
    where
        T: Producer,
        T::Options: Default,
    {
        self.add_producer::<T>(name, T::Options::default())
    }

    /// Mark every producer as not ready.
    pub fn reset(&mut self) {
        for registration in &mut self.registrations {
            registration.set_ready(false);
        }
        trace!(producers = self.registrations.len(), "reset readiness");
    }

    /// Commit the row if every producer is ready.
    ///
    /// Returns `Ok(true)` when the row was appended and `Ok(false)` when it
    /// was dropped under the lenient policy. Readiness is reset in every
    /// case, including on error.
    ///
    /// # Errors
    ///
    /// - [`TupleError::IncompleteRow`] under the fatal policy
    /// - the sink's error if appending fails
    pub fn check_and_fill(&mut self) -> Result<bool> {
        self.check_row().map(|status| status.is_committed())
    }

    /// Like [`check_and_fill`](Self::check_and_fill), but a soft failure
    /// also carries the names of the producers that were not ready.
    pub fn check_row(&mut self) -> Result<RowStatus> {
        let mut missing = Vec::new();
        for registration in &self.registrations {
            if !registration.is_ready() {
                warn!(
                    producer = registration.name(),
                    "producer neither filled nor cleared"
                );
                missing.push(registration.name().to_string());
            }
        }

        if missing.is_empty() {
            let appended = self.sink.append_row();
            self.reset();
            appended?;
            self.rows_committed += 1;
            debug!(rows = self.rows_committed, "row committed");
            return Ok(RowStatus::Committed);
        }

        self.reset();
        if self.options.errors_fatal {
            Err(TupleError::IncompleteRow { missing })
        } else {
            Ok(RowStatus::Incomplete(missing))
        }
    }
}

impl<S> TupleMaker<S> {
    /// Switch between failing and returning `false` on incomplete rows.
    pub fn set_errors_fatal(&mut self, fatal: bool) {
        self.options.errors_fatal = fatal;
    }

    /// Current incomplete-row policy.
    pub fn errors_fatal(&self) -> bool {
        self.options.errors_fatal
    }

    /// Current options.
    pub fn options(&self) -> MakerOptions {
        self.options
    }

    /// Shared access to a producer.
    ///
    /// Returns `None` for a handle issued by another writer.
    pub fn get<T: FieldProducer>(&self, id: ProducerId<T>) -> Option<&T> {
        if id.maker != self.id {
            return None;
        }
        self.registrations.get(id.index)?.downcast_ref::<T>()
    }

    /// Mutable access to a producer, to fill, clear or configure it.
    ///
    /// Returns `None` for a handle issued by another writer.
    pub fn get_mut<T: FieldProducer>(&mut self, id: ProducerId<T>) -> Option<&mut T> {
        if id.maker != self.id {
            return None;
        }
        self.registrations.get_mut(id.index)?.downcast_mut::<T>()
    }

    /// Registered producer names, in registration order.
    pub fn producer_names(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(Registration::name)
    }

    /// Readiness of every producer, in registration order.
    pub fn readiness(&self) -> impl Iterator<Item = (&str, bool)> {
        self.registrations
            .iter()
            .map(|registration| (registration.name(), registration.is_ready()))
    }

    /// Number of registered producers.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether no producer is registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Rows this writer has appended.
    pub fn rows_committed(&self) -> usize {
        self.rows_committed
    }

    /// The storage destination.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Drop the writer and its producers, returning the storage destination.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S, T: FieldProducer> Index<ProducerId<T>> for TupleMaker<S> {
    type Output = T;

    fn index(&self, id: ProducerId<T>) -> &T {
        match self.get(id) {
            Some(producer) => producer,
            None => panic!("producer handle {id:?} does not belong to this writer"),
        }
    }
}

impl<S, T: FieldProducer> IndexMut<ProducerId<T>> for TupleMaker<S> {
    fn index_mut(&mut self, id: ProducerId<T>) -> &mut T {
        let maker = self.id;
        match self.get_mut(id) {
            Some(producer) => producer,
            None => panic!("producer handle {id:?} does not belong to writer {maker}"),
        }
    }
}
