use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use generator::GeneratorError;
use listgen::PipelineError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: max {0}MB allowed")]
    PayloadTooLarge(usize),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Generator(#[from] GeneratorError),
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Generator(err) => match err {
                GeneratorError::MissingApiKey | GeneratorError::InvalidConfig(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                GeneratorError::Transport(_)
                | GeneratorError::Upstream { .. }
                | GeneratorError::InvalidResponse(_)
                | GeneratorError::NonJson { .. }
                | GeneratorError::NotAnObject => StatusCode::BAD_GATEWAY,
            },
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ServerError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ServerError::NotFound => "NOT_FOUND",
            ServerError::Generator(err) => match err {
                GeneratorError::MissingApiKey | GeneratorError::InvalidConfig(_) => "CONFIG_ERROR",
                GeneratorError::Transport(_)
                | GeneratorError::Upstream { .. }
                | GeneratorError::InvalidResponse(_) => "UPSTREAM_ERROR",
                GeneratorError::NonJson { .. } | GeneratorError::NotAnObject => {
                    "GENERATOR_OUTPUT_ERROR"
                }
            },
        }
    }

    /// Extra payload attached to the error envelope.
    fn details(&self) -> Option<Value> {
        match self {
            ServerError::Generator(GeneratorError::Upstream { body, .. }) => {
                Some(Value::String(body.clone()))
            }
            ServerError::Generator(GeneratorError::NonJson { raw }) => {
                Some(json!({ "raw": raw }))
            }
            _ => None,
        }
    }
}

impl From<PipelineError> for ServerError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Generator(err) => ServerError::Generator(err),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_errors_map_to_gateway_codes() {
        let upstream = ServerError::from(GeneratorError::Upstream {
            status: 429,
            body: "slow down".into(),
        });
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream.error_code(), "UPSTREAM_ERROR");
        assert_eq!(upstream.details(), Some(json!("slow down")));

        let non_json = ServerError::from(GeneratorError::NonJson { raw: "hi".into() });
        assert_eq!(non_json.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(non_json.error_code(), "GENERATOR_OUTPUT_ERROR");
        assert_eq!(non_json.details(), Some(json!({ "raw": "hi" })));

        let missing = ServerError::from(PipelineError::Generator(GeneratorError::MissingApiKey));
        assert_eq!(missing.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(missing.error_code(), "CONFIG_ERROR");
        assert_eq!(missing.details(), None);
    }

    #[test]
    fn request_errors() {
        assert_eq!(
            ServerError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ServerError::NotFound.error_code(), "NOT_FOUND");
        assert_eq!(
            ServerError::PayloadTooLarge(1).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn only_generator_configuration_maps_to_config_error() {
        let invalid = ServerError::from(GeneratorError::InvalidConfig("bad url".into()));
        assert_eq!(invalid.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(invalid.error_code(), "CONFIG_ERROR");
    }
}
