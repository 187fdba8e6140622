use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Instant;
use tracing::{debug, info, warn};
use crate::config::{ApiKey, RelayConfig};
use crate::error::RelayError;
use crate::metrics::{TRANSPORT_ERRORS, UPSTREAM_LATENCY, UPSTREAM_RESPONSES};

pub const INVALID_API_KEY_MESSAGE: &str = "Your API key is invalid. Please check it.";
pub const NON_JSON_MESSAGE: &str = "Non-JSON response from Runware";

const INVALID_API_KEY_CODE: &str = "invalidApiKey";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GenerateImage,
    GenerateVideo,
    CheckVideo,
    InpaintImage,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GenerateImage => "generate_image",
            Operation::GenerateVideo => "generate_video",
            Operation::CheckVideo => "check_video",
            Operation::InpaintImage => "inpaint_image",
        }
    }

    // path segments under the base url; check-video appends the task id
    fn path(&self) -> &'static [&'static str] {
        match self {
            Operation::GenerateImage | Operation::InpaintImage => &["v1", "images", "generations"],
            Operation::GenerateVideo => &["v1", "videos", "generations"],
            Operation::CheckVideo => &["v1", "tasks"],
        }
    }
}

// How a Runware reply was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    InvalidApiKey,
    RemoteError,
    NonJson,
}

impl Outcome {
    fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::InvalidApiKey => "invalid_api_key",
            Outcome::RemoteError => "remote_error",
            Outcome::NonJson => "non_json",
        }
    }
}

// response handed back to the inbound caller
#[derive(Debug, Clone, PartialEq)]
pub struct RelayResponse {
    pub status: StatusCode,
    pub body: Value,
    pub outcome: Outcome,
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// invalidApiKey always maps to 401; non-JSON on a 2xx maps to 502
pub fn map_response(status: StatusCode, text: &str) -> RelayResponse {
    let parsed = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(_) => {
            let status = if status.is_success() {
                StatusCode::BAD_GATEWAY
            } else {
                status
            };
            return RelayResponse {
                status,
                body: json!({ "error": NON_JSON_MESSAGE, "raw": text }),
                outcome: Outcome::NonJson,
            };
        }
    };

    if status.is_success() {
        return RelayResponse {
            status,
            body: parsed,
            outcome: Outcome::Success,
        };
    }

    if first_error_code(&parsed) == Some(INVALID_API_KEY_CODE) {
        return RelayResponse {
            status: StatusCode::UNAUTHORIZED,
            body: json!({ "error": INVALID_API_KEY_MESSAGE }),
            outcome: Outcome::InvalidApiKey,
        };
    }

    RelayResponse {
        status,
        body: json!({ "error": parsed }),
        outcome: Outcome::RemoteError,
    }
}

fn first_error_code(body: &Value) -> Option<&str> {
    body.get("errors")?.as_array()?.first()?.get("code")?.as_str()
}

#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    base_url: Url,
    api_key: ApiKey,
}

impl RelayClient {
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| RelayError::InvalidConfig(format!("http client: {}", e)))?;

        info!(
            "Relay client configured: base_url={}, timeout={:?}",
            config.base_url, config.request_timeout
        );

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self, operation: Operation, task_id: Option<&str>) -> Result<Url, RelayError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| RelayError::InvalidConfig("base url cannot be a base".to_string()))?;
            segments.pop_if_empty().extend(operation.path());
            if let Some(id) = task_id {
                // url drops "." and ".." segments, which would hit /v1/tasks itself
                if id == "." || id == ".." {
                    return Err(RelayError::InvalidRequest(format!(
                        "task id '{}' is not a valid path segment",
                        id
                    )));
                }
                segments.push(id);
            }
        }
        Ok(url)
    }

    // body is always a one-element array
    pub async fn submit<T: Serialize>(
        &self,
        operation: Operation,
        task: &T,
    ) -> Result<RelayResponse, RelayError> {
        let url = self.endpoint(operation, None)?;
        debug!("Runware POST {}", url);

        let request = self
            .client
            .post(url)
            .bearer_auth(self.api_key.expose())
            .json(&[task]);

        self.dispatch(operation, request).await
    }

    pub async fn task_status(&self, task_id: &str) -> Result<RelayResponse, RelayError> {
        let url = self.endpoint(Operation::CheckVideo, Some(task_id))?;
        debug!("Runware GET {}", url);

        let request = self
            .client
            .get(url)
            .bearer_auth(self.api_key.expose())
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        self.dispatch(Operation::CheckVideo, request).await
    }

    async fn dispatch(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<RelayResponse, RelayError> {
        let op = operation.as_str();
        let start = Instant::now();

        let result = async {
            let res = request.send().await?;
            let status = res.status();
            let text = res.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        }
        .await;

        UPSTREAM_LATENCY
            .with_label_values(&[op])
            .observe(start.elapsed().as_secs_f64());

        let (status, text) = result.map_err(|e| {
            TRANSPORT_ERRORS.with_label_values(&[op]).inc();
            warn!("[{}] Runware call failed: {}", op, e);
            RelayError::from(e)
        })?;

        let response = map_response(status, &text);
        UPSTREAM_RESPONSES
            .with_label_values(&[op, response.outcome.as_str()])
            .inc();

        match response.outcome {
            Outcome::Success => info!("[{}] Runware answered {}", op, status),
            Outcome::InvalidApiKey => warn!("[{}] Runware rejected the API key ({})", op, status),
            Outcome::RemoteError | Outcome::NonJson => {
                warn!("[{}] Runware error {} ({:?})", op, status, response.outcome)
            }
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> RelayClient {
        let config = RelayConfig::new(base, ApiKey::new("test-key").unwrap()).unwrap();
        RelayClient::new(&config).unwrap()
    }

    #[test]
    fn success_passes_through() {
        let res = map_response(StatusCode::OK, r#"{"data":[{"taskUUID":"x"}]}"#);
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, json!({"data": [{"taskUUID": "x"}]}));
        assert_eq!(res.outcome, Outcome::Success);
    }

    #[test]
    fn non_200_success_status_is_kept() {
        let res = map_response(StatusCode::ACCEPTED, r#"{"data":[]}"#);
        assert_eq!(res.status, StatusCode::ACCEPTED);
    }

    #[test]
    fn invalid_api_key_overrides_status() {
        for status in [StatusCode::BAD_REQUEST, StatusCode::FORBIDDEN, StatusCode::INTERNAL_SERVER_ERROR] {
            let res = map_response(
                status,
                r#"{"errors":[{"code":"invalidApiKey","message":"Invalid API key"}]}"#,
            );
            assert_eq!(res.status, StatusCode::UNAUTHORIZED);
            assert_eq!(res.body, json!({"error": INVALID_API_KEY_MESSAGE}));
        }
    }

    #[test]
    fn other_remote_errors_are_wrapped() {
        let body = r#"{"errors":[{"code":"invalidPositivePrompt"}]}"#;
        let res = map_response(StatusCode::BAD_REQUEST, body);
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            res.body,
            json!({"error": {"errors": [{"code": "invalidPositivePrompt"}]}})
        );
        assert_eq!(res.outcome, Outcome::RemoteError);
    }

    #[test]
    fn empty_error_list_is_a_remote_error() {
        let res = map_response(StatusCode::BAD_REQUEST, r#"{"errors":[]}"#);
        assert_eq!(res.outcome, Outcome::RemoteError);
    }

    #[test]
    fn non_json_keeps_remote_status() {
        let res = map_response(StatusCode::INTERNAL_SERVER_ERROR, "<html>error</html>");
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            res.body,
            json!({"error": NON_JSON_MESSAGE, "raw": "<html>error</html>"})
        );
    }

    #[test]
    fn non_json_success_falls_back_to_bad_gateway() {
        let res = map_response(StatusCode::OK, "");
        assert_eq!(res.status, StatusCode::BAD_GATEWAY);
        assert_eq!(res.outcome, Outcome::NonJson);
    }

    #[test]
    fn endpoints_follow_base_url() {
        let relay = client("http://localhost:9000/proxy/");
        assert_eq!(
            relay.endpoint(Operation::GenerateVideo, None).unwrap().as_str(),
            "http://localhost:9000/proxy/v1/videos/generations"
        );
        assert_eq!(
            relay.endpoint(Operation::InpaintImage, None).unwrap().path(),
            "/proxy/v1/images/generations"
        );
    }

    #[test]
    fn task_id_is_one_encoded_segment() {
        let relay = client("https://api.runware.ai");
        assert_eq!(
            relay.endpoint(Operation::CheckVideo, Some("abc-123")).unwrap().as_str(),
            "https://api.runware.ai/v1/tasks/abc-123"
        );
        assert_eq!(
            relay.endpoint(Operation::CheckVideo, Some("a/b c")).unwrap().path(),
            "/v1/tasks/a%2Fb%20c"
        );
    }

    #[test]
    fn dot_task_ids_are_rejected() {
        let relay = client("https://api.runware.ai");
        for id in [".", ".."] {
            let err = relay.endpoint(Operation::CheckVideo, Some(id)).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(
            relay.endpoint(Operation::CheckVideo, Some("...")).unwrap().path(),
            "/v1/tasks/..."
        );
    }
}
