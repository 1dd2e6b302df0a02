//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::charts::{Correlation, Figure};
use crate::dataset::{DatasetFormat, Selection};
use serde::{Deserialize, Serialize};

// ============================================
// RENDER DTOs
// ============================================

/// Query parameters for the render endpoint; missing values fall back to
/// the dropdown defaults
#[derive(Debug, Default, Deserialize)]
pub struct RenderParams {
    pub outcome: Option<String>,
    pub indicator: Option<String>,
}

/// Both dashboard charts for one selection
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    /// Selection that was rendered
    pub selection: Selection,
    /// Choropleth map figure
    pub map: Figure,
    /// Scatter plot with trendline
    pub correlation: Figure,
    /// Pearson summary of the scatter points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Correlation>,
}

// ============================================
// DATASET DTOs
// ============================================

/// Summary of the loaded observation table
#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    /// URL or path the dataset was read from
    pub source: String,
    /// Detected file format
    pub format: DatasetFormat,
    /// Number of rows (locations)
    pub rows: usize,
    /// Column names in file order
    pub columns: Vec<String>,
    /// When the dataset was loaded (RFC 3339)
    pub loaded_at: String,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Dataset status: ok, empty
    pub dataset: String,
    /// Rows held in memory
    pub rows: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
