//! CSV decoding into [`RawTable`].
//!
//! The reader is deliberately lenient about shape: rows may be shorter or
//! longer than the header (spreadsheet exports often are), blank lines are
//! skipped, and a UTF-8 BOM on the first header is removed. All column
//! matching is left to `llano_core::header`.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use llano_core::RawTable;
use tracing::debug;

use crate::error::{IoError, IoResult};

/// Reads a CSV file from disk.
pub fn read_table(path: &Path) -> IoResult<RawTable> {
    let file = std::fs::File::open(path).map_err(|e| IoError::read(path, e))?;
    let table = read_table_from(file, path)?;

    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "Read table"
    );
    Ok(table)
}

/// Reads CSV from any reader; `origin` is only used in error messages.
pub fn read_table_from<R: Read>(reader: R, origin: &Path) -> IoResult<RawTable> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IoError::from_csv_read(origin, e))?
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

    if headers.iter().all(|h| h.is_empty()) {
        return Err(IoError::EmptyFile {
            path: origin.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IoError::from_csv_read(origin, e))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}
