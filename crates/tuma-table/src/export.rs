//! Text exports of a committed table.

use std::io::Write;

use crate::error::Result;
use crate::table::Table;

impl Table {
    /// Write a header line of column names followed by one line per row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(self.column_names())?;
        for entry in self.rows() {
            csv.write_record(entry.values.iter().map(|(_, value)| value.to_string()))?;
        }
        csv.flush()?;
        Ok(())
    }

    /// CSV rendering as a string.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(feature = "serde")]
mod json {
    use std::io::Write;

    use serde::Serialize;
    use tuma_core::{ColumnType, Value};

    use crate::error::Result;
    use crate::table::Table;

    #[derive(Serialize)]
    struct TableDocument<'a> {
        name: &'a str,
        title: &'a str,
        columns: Vec<ColumnHeader<'a>>,
        rows: Vec<Vec<Value>>,
    }

    #[derive(Serialize)]
    struct ColumnHeader<'a> {
        name: &'a str,
        #[serde(rename = "type")]
        column_type: ColumnType,
    }

    impl Table {
        /// Write the table as a pretty-printed JSON document.
        pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
            let document = TableDocument {
                name: self.name(),
                title: self.title(),
                columns: self
                    .columns()
                    .iter()
                    .map(|column| ColumnHeader {
                        name: column.name(),
                        column_type: column.column_type(),
                    })
                    .collect(),
                rows: self
                    .rows()
                    .map(|entry| entry.values.into_iter().map(|(_, value)| value).collect())
                    .collect(),
            };
            serde_json::to_writer_pretty(writer, &document)?;
            Ok(())
        }
    }
}
