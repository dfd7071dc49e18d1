//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{BatchService, PreviewService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub batch: Arc<BatchService>,
    pub preview: Arc<PreviewService>,
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: &AssetLoader) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(asset_loader);
    create_app_state_with_config(config)
}

/// Create application state from an already loaded config.
pub fn create_app_state_with_config(config: AppConfig) -> anyhow::Result<AppState> {
    let config = config.sanitized();
    if config.limits.max_images == 0 {
        anyhow::bail!("limits.max_images must be at least 1");
    }
    if config.limits.max_upload_bytes == 0 {
        anyhow::bail!("limits.max_upload_bytes must be at least 1");
    }

    let batch = Arc::new(BatchService::new(&config));
    let preview = Arc::new(PreviewService::new(&config));

    Ok(AppState {
        config: Arc::new(config),
        batch,
        preview,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.limits.max_upload_bytes;

    Router::new()
        // Upload page
        .route("/", get(api::handle_index))
        .route("/static/*path", get(api::handle_static))
        // API endpoints
        .route("/api/batch", post(handle_batch))
        .route("/api/preview", post(handle_preview))
        .route("/api/platforms", get(api::handle_platforms))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_batch(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    api::handle_batch(State(state.config), State(state.batch), multipart).await
}

async fn handle_preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    api::handle_preview(State(state.preview), multipart).await
}
