use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// failures of the relay itself, not errors reported by Runware
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Failed to reach Runware: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Runware did not respond in time")]
    Timeout,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Transport(_) => StatusCode::BAD_GATEWAY,
            RelayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RelayError::Timeout
        } else {
            RelayError::Transport(e)
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for RelayError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        RelayError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_per_variant() {
        assert_eq!(RelayError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            RelayError::InvalidRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn invalid_request_keeps_message() {
        let err = RelayError::InvalidRequest("strength must be between 0 and 1".into());
        assert_eq!(err.to_string(), "strength must be between 0 and 1");
    }
}
