//! Dataset Routes
//!
//! - GET /api/v1/dataset - Summary of the loaded observation table

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::DatasetResponse;
use crate::api::state::AppState;

/// GET /api/v1/dataset
pub async fn dataset_summary(State(state): State<Arc<AppState>>) -> Json<DatasetResponse> {
    Json(DatasetResponse {
        source: state.source.location.clone(),
        format: state.source.format,
        rows: state.table.len(),
        columns: state.table.columns().to_vec(),
        loaded_at: state.source.loaded_at.to_rfc3339(),
    })
}
