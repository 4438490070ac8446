use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// A field-level validation failure, surfaced in 400 response bodies.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SiteworkError {
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("Project not found: {0}")]
    ProjectNotFound(i64),

    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("Dependency not found: {predecessor_id} -> {successor_id}")]
    DependencyNotFound {
        predecessor_id: i64,
        successor_id: i64,
    },

    #[error("No tasks to publish in project {0}")]
    NothingPublished(i64),

    #[error("No tasks to unpublish in project {0}")]
    NothingUnpublished(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiteworkError {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: &str, message: &str) -> Self {
        SiteworkError::Validation {
            message: format!("Invalid {}: {}", field, message),
            fields: vec![FieldError::new(field, message)],
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SiteworkError::Validation { .. } => StatusCode::BAD_REQUEST,

            SiteworkError::ProjectNotFound(_)
            | SiteworkError::TaskNotFound(_)
            | SiteworkError::DependencyNotFound { .. } => StatusCode::NOT_FOUND,

            // A bulk flip that touched zero rows is reported as a server
            // failure; "no tasks" and "update failed" are conflated here.
            SiteworkError::NothingPublished(_)
            | SiteworkError::NothingUnpublished(_)
            | SiteworkError::Database(_)
            | SiteworkError::Json(_)
            | SiteworkError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Field details for 400 bodies, when present.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            SiteworkError::Validation { fields, .. } if !fields.is_empty() => {
                Some(fields.as_slice())
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            SiteworkError::validation("title", "must not be empty").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SiteworkError::TaskNotFound(7).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SiteworkError::NothingPublished(1).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_carries_fields() {
        let err = SiteworkError::validation("predecessorId", "must be a positive integer");
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "predecessorId");
    }
}
