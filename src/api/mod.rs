//! Oralscope HTTP API
//!
//! Serves the dashboard page and its render callback, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /` - Dashboard page (dropdowns + two charts)
//! - `GET /api/v1/layout` - Page layout as JSON
//!
//! ## Render
//! - `GET /api/v1/render?outcome=..&indicator=..` - Map and correlation figures
//!
//! ## Dataset
//! - `GET /api/v1/dataset` - Loaded dataset summary
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use oralscope::api::{serve, ApiConfig, AppState};
//! use oralscope::dataset::{load, HttpSource};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = HttpSource::new(oralscope::config::DEFAULT_DATASET_URL, Duration::from_secs(30))?;
//!     let dataset = load(&source).await?;
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(dataset, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{http::HeaderValue, http::Method, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/layout", get(routes::dashboard::layout))
        .route("/render", get(routes::render::render_charts))
        .route("/dataset", get(routes::dataset::dataset_summary));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

/// Start the dashboard server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Oralscope dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Oralscope dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::testing::sample_table;
    use crate::dataset::{parse_csv, Dataset, DatasetFormat, ObservationTable};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app_with(table: ObservationTable) -> Router {
        let dataset = Dataset {
            table,
            source: "memory://sample.csv".to_string(),
            format: DatasetFormat::Csv,
            loaded_at: chrono::Utc::now(),
        };
        build_router(AppState::new(dataset, ApiConfig::default()))
    }

    fn create_test_app() -> Router {
        create_test_app_with(sample_table())
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = get(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_live() {
        let (status, _) = get(create_test_app(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (status, _) = get(create_test_app(), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = get_json(create_test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["rows"], 6);
    }

    #[tokio::test]
    async fn test_index_page() {
        let (status, body) = get(create_test_app(), "/").await;
        assert_eq!(status, StatusCode::OK);

        let page = String::from_utf8(body).unwrap();
        assert!(page.contains(crate::view::HEADING));
        assert!(page.contains("id=\"dental-outcome-dropdown\""));
        assert!(page.contains("id=\"indicator-dropdown\""));
    }

    #[tokio::test]
    async fn test_layout() {
        let (status, body) = get_json(create_test_app(), "/api/v1/layout").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["controls"][0]["value"], "Sealants");
        assert_eq!(body["controls"][1]["options"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_dataset_summary() {
        let (status, body) = get_json(create_test_app(), "/api/v1/dataset").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "memory://sample.csv");
        assert_eq!(body["format"], "csv");
        assert_eq!(body["rows"], 6);
        assert_eq!(body["columns"][0], "State");
    }

    #[tokio::test]
    async fn test_render_defaults() {
        let (status, body) = get_json(create_test_app(), "/api/v1/render").await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(body["selection"]["outcome"], "Sealants");
        assert_eq!(
            body["selection"]["indicator"],
            "Avg Fluoride Concentration 2020"
        );
        assert_eq!(body["map"]["layout"]["title"]["text"], "Sealants by State");
        assert_eq!(
            body["map"]["data"][0]["locations"],
            serde_json::json!(["AL", "AK", "AZ", "DE"])
        );
        assert_eq!(
            body["correlation"]["layout"]["title"]["text"],
            "Correlation between Avg Fluoride Concentration 2020 and Sealants"
        );
        assert_eq!(
            body["correlation"]["data"][0]["x"],
            serde_json::json!([0.68, 0.41, 0.73, 0.7])
        );
        assert_eq!(body["correlation"]["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["summary"]["sample_size"], 4);
    }

    #[tokio::test]
    async fn test_render_explicit_selection() {
        let (status, body) = get_json(
            create_test_app(),
            "/api/v1/render?outcome=Untreated%20Decay&indicator=Percent%20of%20Need%20Met",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["map"]["layout"]["title"]["text"], "Untreated Decay by State");
        // AZ lacks Untreated Decay, CA and DE lack Percent of Need Met
        assert_eq!(
            body["map"]["data"][0]["locations"],
            serde_json::json!(["AL", "AK", "CO"])
        );
    }

    #[tokio::test]
    async fn test_render_unknown_column() {
        let (status, body) = get_json(
            create_test_app(),
            "/api/v1/render?outcome=Sealants&indicator=Fluoride%201999",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNKNOWN_COLUMN");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_render_empty_dataset() {
        let table = parse_csv(b"State,Location,Sealants,Avg Fluoride Concentration 2020\n").unwrap();
        let (status, body) = get_json(create_test_app_with(table), "/api/v1/render").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["map"]["data"][0]["locations"], serde_json::json!([]));
        assert_eq!(body["correlation"]["data"].as_array().unwrap().len(), 1);
        assert!(body.get("summary").is_none());
    }

    #[tokio::test]
    async fn test_render_column_missing_from_dataset() {
        let table = parse_csv(b"State,Location,Sealants\nal,Alabama,41\n").unwrap();
        let (status, body) = get_json(create_test_app_with(table), "/api/v1/render").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "COLUMN_NOT_FOUND");
    }
}
