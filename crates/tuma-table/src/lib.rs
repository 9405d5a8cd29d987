//! In-memory column store for rows assembled by `tuma-core`.
//!
//! [`Table`] implements [`RowSink`](tuma_core::RowSink): producers bind their
//! buffers to its columns at registration, and each committed row snapshots
//! those buffers. Committed rows can be read back by column name and row
//! index, or exported.
//!
//! # Features
//!
//! - `serde`: JSON export with `Table::write_json`
//! - `polars`: conversion with `Table::to_dataframe`

mod column;
mod error;
mod export;
mod table;

#[cfg(feature = "polars")]
mod polars_ext;

pub use column::{Column, ColumnData};
pub use error::{Result, TableError};
pub use table::{Entry, Table};
