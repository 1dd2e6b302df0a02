//! # Oralscope
//!
//! Oral Health Dashboard - a single-page web dashboard mapping U.S. state
//! dental-health outcomes (decay, sealants) against water-fluoridation and
//! unmet-need indicators.
//!
//! ## Features
//!
//! - **Choropleth map**: states shaded by the selected outcome
//! - **Correlation plot**: indicator vs. outcome with an OLS trendline
//! - **One-shot loading**: the dataset is fetched once at startup (XLSX or CSV)
//! - **Pure rendering**: charts are a function of the shared table and the selection
//!
//! ## Modules
//!
//! - [`dataset`]: Observation table, sources and parsing
//! - [`charts`]: Typed chart specifications, statistics and Plotly figures
//! - [`render`]: The selection-to-charts callback
//! - [`view`]: Page layout and HTML shell
//! - [`api`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oralscope::dataset::{load, FileSource, Indicator, Outcome, Selection};
//! use oralscope::render::render;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = load(&FileSource::new("ML_state_oralhealthindicators.xlsx")).await?;
//!
//!     let charts = render(
//!         &dataset.table,
//!         Selection::new(Outcome::Sealants, Indicator::AvgFluorideConcentration2020),
//!     )?;
//!
//!     println!("{}: {} states", charts.map.title, charts.map.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod dataset;
pub mod render;
pub mod view;

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use charts::{ChoroplethSpec, Correlation, Figure, OlsFit, ScatterSpec, Trendline};

pub use config::{Config, ConfigError, DatasetConfig, LoggingConfig, ServerConfig};

pub use dataset::{
    Cell, Dataset, DatasetError, DatasetSource, FileSource, HttpSource, Indicator,
    ObservationTable, Outcome, Selection,
};

pub use render::{render, render_by_name, Charts, RenderError};

pub use view::{dashboard_layout, Layout};
