//! Dataset loading
//!
//! Turns raw bytes into an [`ObservationTable`]. Workbooks (`.xlsx`) are
//! detected by their ZIP signature; anything else is read as CSV with a
//! header row.

use super::error::{DatasetError, DatasetResult};
use super::source::DatasetSource;
use super::table::{Cell, ObservationTable, Row};
use calamine::{Data, Reader, Xlsx};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Cursor;

/// ZIP local file header, the first bytes of every `.xlsx`
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// On-the-wire format of a dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    Xlsx,
    Csv,
}

impl DatasetFormat {
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_MAGIC) {
            DatasetFormat::Xlsx
        } else {
            DatasetFormat::Csv
        }
    }
}

/// The loaded table plus where and when it came from
#[derive(Debug)]
pub struct Dataset {
    pub table: ObservationTable,
    pub source: String,
    pub format: DatasetFormat,
    pub loaded_at: DateTime<Utc>,
}

/// Fetch and parse the dataset. Any failure is final; there are no retries.
pub async fn load(source: &dyn DatasetSource) -> DatasetResult<Dataset> {
    let description = source.describe();
    tracing::info!(source = %description, "Loading dataset");

    let bytes = source.fetch().await?;
    let format = DatasetFormat::detect(&bytes);
    let table = parse(&bytes, format)?;

    tracing::info!(
        source = %description,
        format = ?format,
        rows = table.len(),
        columns = table.columns().len(),
        "Dataset loaded"
    );

    Ok(Dataset {
        table,
        source: description,
        format,
        loaded_at: Utc::now(),
    })
}

/// Parse bytes in the given format
pub fn parse(bytes: &[u8], format: DatasetFormat) -> DatasetResult<ObservationTable> {
    match format {
        DatasetFormat::Xlsx => parse_xlsx(bytes),
        DatasetFormat::Csv => parse_csv(bytes),
    }
}

/// Parse a CSV document whose first record is the header
pub fn parse_csv(bytes: &[u8]) -> DatasetResult<ObservationTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DatasetError::Empty);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: Row = record.iter().map(Cell::parse).collect();
        rows.push(row);
    }

    ObservationTable::new(headers, rows)
}

/// Parse the first worksheet of an `.xlsx` workbook
pub fn parse_xlsx(bytes: &[u8]) -> DatasetResult<ObservationTable> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DatasetError::Empty)??;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(header) => header.iter().map(|d| d.to_string()).collect(),
        None => return Err(DatasetError::Empty),
    };

    let rows = sheet_rows
        .map(|row| row.iter().map(workbook_cell).collect::<Row>())
        .collect();

    ObservationTable::new(headers, rows)
}

fn workbook_cell(data: &Data) -> Option<Cell> {
    match data {
        Data::Int(v) => Some(Cell::Number(*v as f64)),
        Data::Float(v) if v.is_nan() => None,
        Data::Float(v) => Some(Cell::Number(*v)),
        Data::String(s) => Cell::text(s),
        Data::Bool(b) => Some(Cell::Text(b.to_string())),
        Data::DateTime(dt) => Some(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Cell::Text(s.clone())),
        Data::Error(_) | Data::Empty => None,
    }
}
