//! Polars DataFrame conversion.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use crate::column::{Column, ColumnData};
use crate::table::Table;

impl Table {
    /// Copy the committed rows into a DataFrame, one series per column.
    ///
    /// `i16` columns are widened to `i32`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns = self
            .columns()
            .iter()
            .map(|column| to_series(column).into_column())
            .collect::<Vec<_>>();
        DataFrame::new(columns)
    }
}

fn to_series(column: &Column) -> Series {
    match column.data() {
        ColumnData::F32(values) => Series::new(column.name().into(), values.as_slice()),
        ColumnData::F64(values) => Series::new(column.name().into(), values.as_slice()),
        ColumnData::I16(values) => Series::new(
            column.name().into(),
            values.iter().map(|&v| i32::from(v)).collect::<Vec<_>>(),
        ),
        ColumnData::I32(values) => Series::new(column.name().into(), values.as_slice()),
        ColumnData::I64(values) => Series::new(column.name().into(), values.as_slice()),
        ColumnData::U32(values) => Series::new(column.name().into(), values.as_slice()),
        ColumnData::Bool(values) => Series::new(column.name().into(), values.as_slice()),
    }
}
