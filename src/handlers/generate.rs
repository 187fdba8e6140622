use axum::{Json, extract::{State, rejection::JsonRejection}};
use std::sync::Arc;
use tracing::debug;
use crate::error::RelayError;
use crate::metrics::REQUEST_TOTAL;
use crate::models::{GenerationRequest, ImageTask, InpaintRequest, VideoTask};
use crate::relay::{Operation, RelayResponse};
use crate::state::AppState;

pub async fn generate_image_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<RelayResponse, RelayError> {
    REQUEST_TOTAL.with_label_values(&[Operation::GenerateImage.as_str()]).inc();
    let Json(request) = payload?;
    debug!("Image generation request: prompt_len={}", request.prompt.len());

    let task = ImageTask::generate(request.prompt);
    state.relay.submit(Operation::GenerateImage, &task).await
}

// Submits an async job; the reply carries the task UUID to poll /check-video with
pub async fn generate_video_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<RelayResponse, RelayError> {
    REQUEST_TOTAL.with_label_values(&[Operation::GenerateVideo.as_str()]).inc();
    let Json(request) = payload?;

    let task = VideoTask::generate(request.prompt);
    debug!("Video generation request: task_uuid={}", task.task_uuid);
    state.relay.submit(Operation::GenerateVideo, &task).await
}

pub async fn inpaint_image_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InpaintRequest>, JsonRejection>,
) -> Result<RelayResponse, RelayError> {
    REQUEST_TOTAL.with_label_values(&[Operation::InpaintImage.as_str()]).inc();
    let Json(request) = payload?;

    let task = ImageTask::inpaint(request, &state.inpaint)?;
    debug!(
        "Inpaint request: seed_image={:?}, mask_image={:?}, strength={:?}",
        task.seed_image, task.mask_image, task.strength
    );
    state.relay.submit(Operation::InpaintImage, &task).await
}
