//! Shared structural conventions for both export shapes.
//!
//! Every export places its header at record index 3 with data starting at
//! index 4; the first three records are title/date banner rows. Sheets
//! shorter than that carry no data and are recovered as empty results.

use crate::error::Result;
use csv::{ReaderBuilder, StringRecord};

/// Zero-based record index of the header row.
pub const HEADER_ROW_INDEX: usize = 3;

/// Zero-based record index of the first data row.
pub const DATA_ROW_INDEX: usize = 4;

/// Minimum record count for a sheet to carry any data at all.
pub const MIN_RECORD_COUNT: usize = 5;

/// Reads a full CSV export into records. The exports are ragged, so the
/// reader runs headerless and flexible.
pub(crate) fn read_records(text: &str) -> Result<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }
    Ok(records)
}
