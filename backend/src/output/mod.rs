//! Fixture file output
//!
//! Records are encoded to CSV in memory, then written to a temporary file
//! next to the destination and renamed over it. A failed run never leaves a
//! truncated fixture behind.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::models::{TransactionRecord, CSV_HEADER};

/// Errors while encoding, writing or reading fixture files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot write fixture to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read fixture from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unexpected header {found:?}")]
    UnexpectedHeader { found: Vec<String> },
}

/// Encode records as CSV: the fixed header, then one line per record
pub fn encode_csv(records: &[TransactionRecord]) -> Result<Vec<u8>, OutputError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| OutputError::Csv(csv::Error::from(e.into_error())))
}

/// Replace `path` with `bytes` via a temporary file in the same directory
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), OutputError> {
    let write_err = |source: io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Encode and atomically write records to `path`
pub fn write_transactions(path: &Path, records: &[TransactionRecord]) -> Result<Vec<u8>, OutputError> {
    let bytes = encode_csv(records)?;
    write_atomic(path, &bytes)?;
    Ok(bytes)
}

/// Parse fixture CSV, checking the header
pub fn read_transactions_from<R: Read>(input: R) -> Result<Vec<TransactionRecord>, OutputError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(input);

    let header = reader.headers()?;
    if header.iter().ne(CSV_HEADER.iter().copied()) {
        return Err(OutputError::UnexpectedHeader {
            found: header.iter().map(str::to_string).collect(),
        });
    }

    reader
        .deserialize()
        .collect::<Result<Vec<TransactionRecord>, csv::Error>>()
        .map_err(OutputError::from)
}

/// Read a fixture file written by [`write_transactions`]
pub fn read_transactions(path: &Path) -> Result<Vec<TransactionRecord>, OutputError> {
    let file = std::fs::File::open(path).map_err(|source| OutputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_transactions_from(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(row: usize, merchant: &str, location: &str) -> TransactionRecord {
        let ts = NaiveDate::from_ymd_opt(2023, 7, 4)
            .unwrap()
            .and_hms_opt(18, 5, 0)
            .unwrap();
        TransactionRecord::new(row, 12, 1_999, merchant, "Restaurants", ts, location)
    }

    #[test]
    fn test_empty_encodes_header_only() {
        let bytes = encode_csv(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "TransactionID,AccountID,Amount,Merchant,Category,Timestamp,Location\n"
        );
    }

    #[test]
    fn test_fields_with_delimiter_are_quoted() {
        let bytes = encode_csv(&[record(0, "McDonald's", "Chicago, USA")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let line = text.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "TXN000001,ACC0012,19.99,McDonald's,Restaurants,2023-07-04 18:05:00,\"Chicago, USA\""
        );
    }

    #[test]
    fn test_read_back_in_memory() {
        let records = vec![
            record(0, "Subway", "Paris, France"),
            record(1, "Chipotle", "Singapore"),
        ];
        let bytes = encode_csv(&records).unwrap();
        let parsed = read_transactions_from(bytes.as_slice()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_wrong_header_rejected() {
        let input = "Id,Amount\nTXN000001,1.00\n";
        let err = read_transactions_from(input.as_bytes()).unwrap_err();
        assert!(matches!(err, OutputError::UnexpectedHeader { .. }));
    }
}
