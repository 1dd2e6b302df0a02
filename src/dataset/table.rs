//! Observation table
//!
//! Column-named, row-oriented in-memory table holding one row per U.S.
//! state or territory. Built once at startup and never mutated afterwards;
//! rendering derives owned copies through [`ObservationTable::drop_missing`].

use super::columns::{LOCATION_COLUMN, STATE_COLUMN};
use super::error::{DatasetError, DatasetResult};
use serde::Serialize;
use std::collections::HashMap;

/// Markers read as a missing value, as spreadsheet and data-frame readers do
const NA_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

fn is_na(raw: &str) -> bool {
    NA_MARKERS.contains(&raw)
}

/// A present cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Parse a raw text cell. Returns `None` for missing values.
    pub fn parse(raw: &str) -> Option<Cell> {
        let trimmed = raw.trim();
        if is_na(trimmed) {
            return None;
        }

        match trimmed.parse::<f64>() {
            Ok(value) if value.is_nan() => None,
            Ok(value) => Some(Cell::Number(value)),
            Err(_) => Some(Cell::Text(trimmed.to_string())),
        }
    }

    /// A cell typed as text by its source. Only NA markers become missing;
    /// numeric-looking text stays text.
    pub fn text(raw: &str) -> Option<Cell> {
        if is_na(raw.trim()) {
            None
        } else {
            Some(Cell::Text(raw.to_string()))
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Number(_) => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// A single row; `None` marks a missing cell
pub type Row = Vec<Option<Cell>>;

/// In-memory dataset with upper-cased state keys
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Row>,
    state_idx: usize,
}

impl ObservationTable {
    /// Build a table from a header and rows.
    ///
    /// Rows shorter than the header are padded with missing cells, longer
    /// rows are truncated. `State` and `Location` must be present; every
    /// text value in `State` is upper-cased.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> DatasetResult<Self> {
        if columns.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }

        let state_idx = *index
            .get(STATE_COLUMN)
            .ok_or_else(|| DatasetError::ColumnNotFound(STATE_COLUMN.to_string()))?;
        if !index.contains_key(LOCATION_COLUMN) {
            return Err(DatasetError::ColumnNotFound(LOCATION_COLUMN.to_string()));
        }

        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                if let Some(Cell::Text(state)) = &mut row[state_idx] {
                    *state = state.to_uppercase();
                }
                row
            })
            .collect();

        Ok(Self {
            columns,
            index,
            rows,
            state_idx,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column
    pub fn column_index(&self, name: &str) -> DatasetResult<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| DatasetError::ColumnNotFound(name.to_string()))
    }

    /// Clone out every value of a column in row order
    pub fn column_values(&self, name: &str) -> DatasetResult<Vec<Option<Cell>>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].clone()).collect())
    }

    /// Values of the state abbreviation column
    pub fn states(&self) -> impl Iterator<Item = Option<&Cell>> {
        self.rows.iter().map(move |row| row[self.state_idx].as_ref())
    }

    /// Derive a copy keeping only rows where every listed column is present
    pub fn drop_missing(&self, subset: &[&str]) -> DatasetResult<ObservationTable> {
        let indices = subset
            .iter()
            .map(|name| self.column_index(name))
            .collect::<DatasetResult<Vec<_>>>()?;

        let rows = self
            .rows
            .iter()
            .filter(|row| indices.iter().all(|&i| row[i].is_some()))
            .cloned()
            .collect();

        Ok(ObservationTable {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows,
            state_idx: self.state_idx,
        })
    }

    /// Round the numeric values of a column to `decimals` places.
    ///
    /// Consumes the table so only derived copies can be rounded.
    pub fn round_column(mut self, name: &str, decimals: u32) -> DatasetResult<Self> {
        let idx = self.column_index(name)?;
        for row in &mut self.rows {
            if let Some(Cell::Number(v)) = &mut row[idx] {
                *v = round_to(*v, decimals);
            }
        }
        Ok(self)
    }
}

/// Round to a number of decimal places: scale, round half to even, unscale.
///
/// Matches the data-frame `round` the published charts were made with, so a
/// scaled value sitting exactly on a half goes to the even neighbour.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}
