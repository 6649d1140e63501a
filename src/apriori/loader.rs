use super::transactions::TransactionSet;
use crate::error::{MiningError, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::warn;

/// Transactions read from a cleaned CSV file.
#[derive(Debug, Clone)]
pub struct LoadedTransactions {
    pub transactions: TransactionSet,
    /// Records skipped because they held no usable item.
    pub skipped_rows: usize,
}

/// Splits one cell into trimmed, non-empty item labels.
pub fn parse_items(cell: &str, delimiter: &str) -> Vec<String> {
    cell.split(delimiter)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_record(record: &csv::ByteRecord, delimiter: &str, line: u64) -> Result<Vec<String>> {
    let raw = record.get(0).ok_or_else(|| MiningError::MalformedRow {
        line,
        reason: "record has no columns".to_string(),
    })?;
    let cell = std::str::from_utf8(raw).map_err(|err| MiningError::MalformedRow {
        line,
        reason: format!("invalid utf-8: {err}"),
    })?;
    let items = parse_items(cell, delimiter);
    if items.is_empty() {
        return Err(MiningError::MalformedRow {
            line,
            reason: "no items after trimming".to_string(),
        });
    }
    Ok(items)
}

/// Reads transactions from any CSV source. The first record is a header.
///
/// Records are read as raw bytes so an undecodable row is skipped like any
/// other malformed row; only I/O and framing errors end the read.
pub fn read_transactions<R: Read>(reader: R, delimiter: &str) -> Result<LoadedTransactions> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped_rows = 0;

    for (idx, record) in csv_reader.byte_records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(idx as u64 + 2);
        match parse_record(&record, delimiter, line) {
            Ok(items) => rows.push(items),
            Err(err) => {
                warn!(%err, "skipping row");
                skipped_rows += 1;
            }
        }
    }

    Ok(LoadedTransactions {
        transactions: TransactionSet::from_records(rows),
        skipped_rows,
    })
}

pub fn load_transactions(path: &Path, delimiter: &str) -> Result<LoadedTransactions> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => MiningError::MissingInput {
            path: path.to_path_buf(),
        },
        _ => MiningError::Io(err),
    })?;
    read_transactions(file, delimiter)
}
