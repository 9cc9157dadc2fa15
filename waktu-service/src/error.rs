use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use waktu_core::errors::WaktuError;
use waktu_protocol::batch::BatchError;

/// Result type returned by the HTTP handlers.
pub type AppResult<T> = Result<T, AppError>;

/// One offending field, as reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationBody {
    pub index: usize,
    pub field: &'static str,
    pub reason: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// HTTP-facing error: a status code plus a JSON body.
#[derive(Debug, Clone)]
pub struct AppError {
    status: StatusCode,
    message: String,
    violations: Vec<ViolationBody>,
}

impl AppError {
    fn new<M: Into<String>>(status: StatusCode, message: M) -> Self {
        Self {
            status,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    pub fn bad_request<M: Into<String>>(message: M) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found<M: Into<String>>(message: M) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn with_violations(mut self, violations: Vec<ViolationBody>) -> Self {
        self.violations = violations;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = if self.violations.is_empty() {
            serde_json::json!({ "error": self.message })
        } else {
            serde_json::json!({ "error": self.message, "violations": self.violations })
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<BatchError> for AppError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::Validation(validation) => {
                let violations = validation
                    .violations
                    .iter()
                    .map(|violation| ViolationBody {
                        index: violation.index,
                        field: violation.field,
                        reason: violation.reason.as_str(),
                        raw: None,
                    })
                    .collect();
                AppError::bad_request("validation failed").with_violations(violations)
            }
            BatchError::Normalization { index, source } => {
                let violation = ViolationBody {
                    index,
                    field: source.field,
                    reason: "malformed",
                    raw: Some(source.raw.clone()),
                };
                AppError::bad_request(source.to_string()).with_violations(vec![violation])
            }
        }
    }
}

impl From<WaktuError> for AppError {
    fn from(err: WaktuError) -> Self {
        AppError::internal(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        AppError::new(status, rejection.body_text())
    }
}
