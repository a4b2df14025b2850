use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::{SchedulingError, StorageError};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    #[allow(dead_code)]
    BadRequest(String),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

fn scheduling_status(error: &SchedulingError) -> StatusCode {
    match error {
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        SchedulingError::HeatFull { .. }
        | SchedulingError::CannotRemoveHeatWithRegistrations { .. } => StatusCode::CONFLICT,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::Scheduling(e)) => scheduling_status(e),
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                json!({
                    "error": msg
                })
            }
            Self::Storage(StorageError::Scheduling(e)) => {
                tracing::debug!("Scheduling request rejected: {}", e);
                match e {
                    SchedulingError::CannotRemoveHeatWithRegistrations { heat_ids } => json!({
                        "error": e.to_string(),
                        "heat_ids": heat_ids
                    }),
                    _ => json!({
                        "error": e.to_string()
                    }),
                }
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn status_of(error: SchedulingError) -> StatusCode {
        WebError::from(StorageError::from(error))
            .into_response()
            .status()
    }

    #[test]
    fn test_heat_full_is_conflict() {
        let status = status_of(SchedulingError::HeatFull {
            heat_id: Uuid::new_v4(),
        });
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_blocked_removal_is_conflict() {
        let status = status_of(SchedulingError::CannotRemoveHeatWithRegistrations {
            heat_ids: vec![Uuid::new_v4()],
        });
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_configuration_problems_are_unprocessable() {
        assert_eq!(
            status_of(SchedulingError::NoWorkoutsConfigured),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(SchedulingError::ConfigurationError("missing".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        assert_eq!(
            status_of(SchedulingError::LaneNotFound(Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WebError::from(StorageError::NotFound).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_unauthorized() {
        assert_eq!(
            WebError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
