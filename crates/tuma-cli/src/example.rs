//! The two-track example run: fill rows, clear one track on the last row,
//! and export the resulting table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use tuma_core::{FieldProducer, MakerOptions, RowStatus, TupleMaker};
use tuma_predef::{LorentzColumns, LorentzVector, LorentzVectorTrack};
use tuma_table::Table;

/// Energy written by the first track on the closing row.
pub const SENTINEL_ENERGY: f64 = 9999.0;

/// Settings for [`run_example`].
#[derive(Debug, Clone)]
pub struct ExampleConfig {
    /// Rows where both tracks are filled, before the closing row.
    pub rows: u32,
    /// Store angles in degrees.
    pub degrees: bool,
    /// Report incomplete rows instead of failing on them.
    pub lenient: bool,
    /// Leave the second track untouched on the closing row.
    pub skip_clear: bool,
}

impl Default for ExampleConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            degrees: false,
            lenient: false,
            skip_clear: false,
        }
    }
}

/// A row that was not committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based attempt number.
    pub attempt: u32,
    pub missing: Vec<String>,
}

#[derive(Debug)]
pub struct ExampleRun {
    pub table: Table,
    pub skipped: Vec<SkippedRow>,
}

impl ExampleRun {
    pub fn has_skipped_rows(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Export formats for [`write_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Run the example against a fresh in-memory table.
///
/// Track `p1` declares every column, `p2` only `E`, `M`, `Theta` and `Phi`.
/// Each of the first `rows` rows fills both; the closing row fills `p1` with
/// [`SENTINEL_ENERGY`] and clears `p2` unless `skip_clear` is set.
pub fn run_example(config: &ExampleConfig) -> Result<ExampleRun> {
    let span = info_span!("example", rows = config.rows, lenient = config.lenient);
    let _guard = span.enter();

    let options = MakerOptions::default().with_errors_fatal(!config.lenient);
    let mut tmk = TupleMaker::with_options(Some(Table::new("T", "Tuple")), options)
        .context("create tuple maker")?;
    let p1 = tmk
        .add_default_producer::<LorentzVectorTrack>("p1")
        .context("register producer p1")?;
    let p2 = tmk
        .add_producer::<LorentzVectorTrack>(
            "p2",
            LorentzColumns::E | LorentzColumns::M | LorentzColumns::PHI | LorentzColumns::THETA,
        )
        .context("register producer p2")?;
    tmk[p1].use_angles_deg(config.degrees);
    tmk[p2].use_angles_deg(config.degrees);
    debug!(columns = tmk.sink().num_columns(), "producers registered");

    let mut v1 = LorentzVector::new(1.0, 2.0, 3.0, 4.0);
    let mut v2 = v1;
    let mut skipped = Vec::new();

    for i in 0..config.rows {
        v1.set_e(100.0 + f64::from(i));
        v2.set_e(200.0 + f64::from(i));
        tmk[p1].fill(&v1);
        tmk[p2].fill(&v2);
        let status = tmk.check_row().with_context(|| format!("row {i}"))?;
        record(&mut skipped, i, status);
    }

    v1.set_e(SENTINEL_ENERGY);
    tmk[p1].fill(&v1);
    if !config.skip_clear {
        tmk[p2].clear();
    }
    let attempt = config.rows;
    let status = tmk
        .check_row()
        .with_context(|| format!("row {attempt}"))?;
    record(&mut skipped, attempt, status);

    let table = tmk.into_sink();
    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        skipped = skipped.len(),
        "example finished"
    );
    Ok(ExampleRun { table, skipped })
}

fn record(skipped: &mut Vec<SkippedRow>, attempt: u32, status: RowStatus) {
    if let RowStatus::Incomplete(missing) = status {
        warn!(attempt, missing = ?missing, "row skipped");
        skipped.push(SkippedRow { attempt, missing });
    }
}

/// Write `table` to `path`, replacing any existing file.
pub fn write_table(table: &Table, path: &Path, format: ExportFormat) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Csv => table.write_csv(&mut writer),
        ExportFormat::Json => table.write_json(&mut writer),
    }
    .with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    info!(path = %path.display(), ?format, "table written");
    Ok(())
}
