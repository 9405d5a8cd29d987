//! Terminal rendering of example runs.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tuma_core::Value;

use crate::example::ExampleRun;

/// Rows shown side by side before the table wraps into another block.
const ROWS_PER_BLOCK: usize = 6;

pub fn print_run(run: &ExampleRun, show_rows: bool) {
    let table = &run.table;
    println!(
        "Table: {} ({}) - {} rows, {} columns",
        table.name(),
        table.title(),
        table.num_rows(),
        table.num_columns()
    );
    if show_rows && !table.is_empty() {
        println!("Example tuple filled, checking it:");
        let rows: Vec<_> = table.rows().collect();
        for block in rows.chunks(ROWS_PER_BLOCK) {
            let mut view = Table::new();
            let mut header = vec![header_cell("Column")];
            header.extend(block.iter().map(|entry| header_cell(&format!("Row {}", entry.index))));
            view.set_header(header);
            apply_table_style(&mut view);
            for index in 1..=block.len() {
                align_column(&mut view, index, CellAlignment::Right);
            }
            for name in table.column_names() {
                let mut cells = vec![Cell::new(name)];
                cells.extend(
                    block
                        .iter()
                        .map(|entry| value_cell(entry.get(name).as_ref())),
                );
                view.add_row(cells);
            }
            println!("{view}");
        }
    }
    if run.has_skipped_rows() {
        eprintln!("Skipped rows:");
        for row in &run.skipped {
            eprintln!("- row {}: not filled: {}", row.attempt, row.missing.join(", "));
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: Option<&Value>) -> Cell {
    match value {
        Some(value) if value.is_neutral() => dim_cell(value),
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
