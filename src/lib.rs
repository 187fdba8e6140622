pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod relay;
pub mod state;

use axum::{Router, routing::{get, post}};
use std::sync::Arc;
use tower_http::{services::ServeFile, trace::TraceLayer};
use crate::handlers::{
    check_video_handler, generate_image_handler, generate_video_handler, health_handler,
    inpaint_image_handler, metrics_handler,
};
use crate::state::AppState;

// creating the router with routes
pub fn create_app(state: Arc<AppState>) -> Router {
    let index = ServeFile::new(state.static_dir.join("index.html"));

    Router::new()
        .route("/generate-image", post(generate_image_handler))
        .route("/generate-video", post(generate_video_handler))
        .route("/check-video/{task_id}", get(check_video_handler))
        .route("/inpaint-image", post(inpaint_image_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route_service("/", index)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
