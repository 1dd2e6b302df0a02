//! Dashboard Routes
//!
//! The page shell and its layout description.
//!
//! - GET / - Dashboard HTML page
//! - GET /api/v1/layout - Layout as JSON

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::view::Layout;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.as_ref().clone())
}

/// GET /api/v1/layout
pub async fn layout(State(state): State<Arc<AppState>>) -> Json<Layout> {
    Json(state.layout.as_ref().clone())
}
