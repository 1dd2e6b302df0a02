//! Oral health dataset
//!
//! The observation table and everything needed to get it into memory:
//!
//! - [`source`]: where the bytes come from (HTTP or local file)
//! - [`loader`]: format detection and parsing (XLSX or CSV)
//! - [`table`]: the in-memory table with null-aware cells
//! - [`columns`]: the selectable outcome and indicator columns

pub mod columns;
mod error;
pub mod loader;
pub mod source;
pub mod table;

pub use columns::{Indicator, Outcome, Selection, UnknownColumn, LOCATION_COLUMN, STATE_COLUMN};
pub use error::{DatasetError, DatasetResult};
pub use loader::{load, parse, parse_csv, parse_xlsx, Dataset, DatasetFormat};
pub use source::{DatasetSource, FileSource, HttpSource};
pub use table::{round_to, Cell, ObservationTable, Row};
