//! Render Routes
//!
//! The dashboard's callback endpoint.
//!
//! - GET /api/v1/render - Charts for an (outcome, indicator) selection

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{RenderParams, RenderResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dataset::{Indicator, Outcome, Selection};
use crate::render::{render, RenderError};

/// GET /api/v1/render
///
/// Filters the shared table to the selection, then builds the choropleth
/// map and the correlation scatter plot as Plotly figures.
pub async fn render_charts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RenderParams>,
) -> ApiResult<Json<RenderResponse>> {
    let selection = parse_selection(&params)?;
    let charts = render(&state.table, selection)?;

    Ok(Json(RenderResponse {
        selection,
        map: charts.map_figure(),
        correlation: charts.correlation_figure(),
        summary: charts.correlation_summary(),
    }))
}

fn parse_selection(params: &RenderParams) -> Result<Selection, RenderError> {
    let outcome = match params.outcome.as_deref() {
        Some(name) => name.parse::<Outcome>()?,
        None => Outcome::default(),
    };
    let indicator = match params.indicator.as_deref() {
        Some(name) => name.parse::<Indicator>()?,
        None => Indicator::default(),
    };
    Ok(Selection::new(outcome, indicator))
}
