use axum::extract::{Path, State};
use std::sync::Arc;
use tracing::debug;
use crate::error::RelayError;
use crate::metrics::REQUEST_TOTAL;
use crate::relay::{Operation, RelayResponse};
use crate::state::AppState;

// Poll a video job; the id is forwarded as-is, Runware decides if it is valid
pub async fn check_video_handler(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<RelayResponse, RelayError> {
    REQUEST_TOTAL.with_label_values(&[Operation::CheckVideo.as_str()]).inc();
    debug!("Video status requested: task_id={}", task_id);

    state.relay.task_status(&task_id).await
}
