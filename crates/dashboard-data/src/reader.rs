//! Deals file loading.
//!
//! Reads the semicolon-delimited CRM export into an untyped [`RawTable`].
//! No column is interpreted here; renaming and coercion belong to the
//! normaliser.

use std::io::Read;
use std::path::Path;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::RawTable;
use tracing::{debug, info};

/// Field delimiter of the CRM export.
pub const DELIMITER: u8 = b';';

// ── Public API ────────────────────────────────────────────────────────────────

/// Open and read the deals file at `path`.
pub fn load_raw_table(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_raw_table(std::io::BufReader::new(file))?;
    info!(
        "Loaded {} rows ({} columns) from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Read a deals table from any byte source.
///
/// The first record is the header. Cells are trimmed; blank cells become
/// `None`. A UTF-8 byte-order mark in front of the first header is dropped.
pub fn read_raw_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(cell_value).collect::<Vec<_>>());
    }

    debug!("Read {} data rows", rows.len());
    Ok(RawTable::new(headers, rows))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn cell_value(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
