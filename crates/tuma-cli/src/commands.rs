//! Subcommand drivers and exit-code selection.

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info;

use tuma_core::{ColumnDeclarer, Producer};
use tuma_predef::{CandidateOptions, CandidateTrack};

use crate::cli::{ColumnsArgs, Command, ExampleArgs, OutputFormatArg};
use crate::example::{ExampleConfig, ExampleRun, ExportFormat, run_example, write_table};
use crate::summary::{apply_table_style, print_run};

/// Run a subcommand, print its output and return the process exit code.
///
/// 0 on success; 1 on any error, or when rows were skipped.
pub fn execute(command: &Command) -> i32 {
    match command {
        Command::Example(args) => match run_example_command(args) {
            Ok(run) => {
                print_run(&run, !args.no_show);
                example_exit_code(&run)
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Columns(args) => match run_columns(args) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    }
}

/// Exit code of a finished example run: 1 if any row was skipped.
pub fn example_exit_code(run: &ExampleRun) -> i32 {
    i32::from(run.has_skipped_rows())
}

pub fn run_example_command(args: &ExampleArgs) -> Result<ExampleRun> {
    let config = ExampleConfig {
        rows: args.rows,
        degrees: args.degrees,
        lenient: args.lenient,
        skip_clear: args.skip_clear,
    };
    let run = run_example(&config)?;
    if let Some(path) = &args.output {
        let format = match args.format {
            OutputFormatArg::Csv => ExportFormat::Csv,
            OutputFormatArg::Json => ExportFormat::Json,
        };
        write_table(&run.table, path, format)?;
    }
    Ok(run)
}

/// Column name, type and type code of every column a track would declare.
pub fn column_table(args: &ColumnsArgs) -> Result<Table> {
    let options = CandidateOptions::new(args.select).with_vertex(args.vertex);
    let mut columns = ColumnDeclarer::new(&args.name);
    CandidateTrack::declare_columns(&mut columns, options)
        .with_context(|| format!("declare columns for {}", args.name))?;
    info!(producer = %args.name, selection = %args.select, count = columns.len(), "columns listed");

    let mut table = Table::new();
    table.set_header(vec!["Column", "Type", "Code"]);
    apply_table_style(&mut table);
    for (name, column_type) in columns.columns() {
        table.add_row(vec![
            name.to_string(),
            column_type.name().to_string(),
            column_type.code().to_string(),
        ]);
    }
    Ok(table)
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let table = column_table(args)?;
    println!("{table}");
    Ok(())
}
