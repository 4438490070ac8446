//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`; the conversion from
//! `SiteworkError` picks the status code and decides how much detail the
//! client sees. Internal failures are logged server-side and surface as a
//! generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::SiteworkError;

/// Wire shape of every error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl From<SiteworkError> for ApiError {
    fn from(err: SiteworkError) -> Self {
        let status = err.status_code();

        let (message, details) = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %err, "request failed");
            (internal_message(&err), None)
        } else {
            let details = err
                .field_errors()
                .and_then(|fields| serde_json::to_value(fields).ok());
            (err.to_string(), details)
        };

        Self {
            status,
            body: ErrorBody { message, details },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn internal_message(err: &SiteworkError) -> String {
    match err {
        // The zero-rows publish/unpublish message is deliberate and
        // actionable; persistence errors stay generic.
        SiteworkError::NothingPublished(_) | SiteworkError::NothingUnpublished(_) => {
            err.to_string()
        }
        _ => "internal server error".to_string(),
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
