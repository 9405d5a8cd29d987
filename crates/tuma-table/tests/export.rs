//! Integration tests for committing rows into a table and exporting them.

use tuma_core::{ColumnDeclarer, FieldProducer, Producer, Slot, TupleMaker, Value};
use tuma_table::Table;

#[derive(Default)]
struct Hit {
    energy: Slot<f64>,
    charge: Slot<i16>,
    ready: bool,
}

impl Hit {
    fn fill(&mut self, energy: f64, charge: i16) {
        self.energy.set(energy);
        self.charge.set(charge);
        self.ready = true;
    }
}

impl FieldProducer for Hit {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    fn clear(&mut self) {
        self.energy.clear();
        self.charge.clear();
        self.ready = true;
    }
}

impl Producer for Hit {
    type Options = ();

    fn declare_columns(columns: &mut ColumnDeclarer<'_>, _: ()) -> tuma_core::Result<Self> {
        let hit = Self::default();
        columns.declare("E", &hit.energy)?;
        columns.declare("Q", &hit.charge)?;
        Ok(hit)
    }
}

fn filled_table() -> Table {
    let mut table = Table::new("T", "Tuple");
    {
        let mut tmk = TupleMaker::new(Some(&mut table)).unwrap();
        let h1 = tmk.add_default_producer::<Hit>("h1").unwrap();
        let h2 = tmk.add_default_producer::<Hit>("h2").unwrap();

        tmk[h1].fill(100.0, 1);
        tmk[h2].fill(200.5, -1);
        assert!(tmk.check_and_fill().unwrap());

        tmk[h1].fill(101.0, 1);
        tmk[h2].clear();
        assert!(tmk.check_and_fill().unwrap());
    }
    table
}

#[test]
fn writer_over_borrowed_table_commits_rows() {
    let table = filled_table();

    assert_eq!(table.num_rows(), 2);
    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        vec!["fh1E", "fh1Q", "fh2E", "fh2Q"]
    );
    assert_eq!(table.get_f64("fh2E", 0), Some(200.5));
    assert_eq!(table.value("fh2Q", 0), Some(Value::I16(-1)));
    assert_eq!(table.get_f64("fh2E", 1), Some(0.0));
    assert_eq!(table.value("fh2Q", 1), Some(Value::I16(0)));
}

#[test]
fn csv_export_matches_committed_rows() {
    let csv = filled_table().to_csv_string().unwrap();
    insta::assert_snapshot!(csv, @r"
    fh1E,fh1Q,fh2E,fh2Q
    100,1,200.5,-1
    101,1,0,0
    ");
}

#[test]
fn csv_export_of_empty_table_has_header_only() {
    let mut table = Table::new("T", "Tuple");
    {
        let mut tmk = TupleMaker::new(Some(&mut table)).unwrap();
        tmk.add_default_producer::<Hit>("h1").unwrap();
    }
    assert_eq!(table.to_csv_string().unwrap(), "fh1E,fh1Q\n");
}
