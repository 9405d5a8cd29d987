//! Row assembly for columnar datasets.
//!
//! A [`TupleMaker`] owns a set of named [`FieldProducer`]s. Each producer
//! declares its columns on a [`RowSink`] when it is registered and keeps the
//! column buffers ([`Slot`]s) the sink reads from. A row is only appended when
//! every producer was filled or explicitly cleared since the last reset.
//!
//! # Example
//!
//! ```no_run
//! use tuma_core::{
//!     ColumnDeclarer, FieldProducer, Producer, Result, RowSink, Slot, TupleMaker,
//! };
//!
//! #[derive(Default)]
//! struct Energy {
//!     e: Slot<f64>,
//!     ready: bool,
//! }
//!
//! impl Energy {
//!     fn fill(&mut self, e: f64) {
//!         self.e.set(e);
//!         self.ready = true;
//!     }
//! }
//!
//! impl FieldProducer for Energy {
//!     fn is_ready(&self) -> bool {
//!         self.ready
//!     }
//!     fn set_ready(&mut self, ready: bool) {
//!         self.ready = ready;
//!     }
//!     fn clear(&mut self) {
//!         self.e.clear();
//!         self.ready = true;
//!     }
//! }
//!
//! impl Producer for Energy {
//!     type Options = ();
//!     fn declare_columns(columns: &mut ColumnDeclarer<'_>, _: ()) -> Result<Self> {
//!         let producer = Self::default();
//!         columns.declare("E", &producer.e)?;
//!         Ok(producer)
//!     }
//! }
//!
//! fn produce<S: RowSink>(sink: S) -> Result<()> {
//!     let mut tmk = TupleMaker::new(Some(sink))?;
//!     let p1 = tmk.add_default_producer::<Energy>("p1")?; // column "fp1E"
//!     for i in 0..3 {
//!         tmk.reset();
//!         tmk[p1].fill(100.0 + f64::from(i));
//!         tmk.check_and_fill()?;
//!     }
//!     Ok(())
//! }
//! ```

mod column;
mod error;
mod maker;
mod producer;
mod sink;

// Re-export error types
pub use error::{Result, TupleError};

// Re-export column buffers
pub use column::{ColumnType, Scalar, Slot, SlotRef, Value};

// Re-export producer and sink contracts
pub use producer::{FieldProducer, Producer, ProducerId};
pub use sink::{COLUMN_PREFIX, ColumnDeclarer, RowSink, column_name};

// Re-export the writer
pub use maker::{MakerOptions, RowStatus, TupleMaker};
