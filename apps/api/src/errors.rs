use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::recommend::assignment::AssignmentError;
use crate::revise::editor::ReviseError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error(transparent)]
    Revise(#[from] ReviseError),

    #[error("LLM error: {0}")]
    Llm(String),

    /// The one externally specified failure shape: the email drafting route
    /// answers 500 with `{"error": "Failed to generate email"}`, nothing more.
    #[error("Email generation failed")]
    EmailGeneration,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Assignment(err) => {
                let status = match err {
                    AssignmentError::Unassigned(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    _ => StatusCode::BAD_REQUEST,
                };
                if let AssignmentError::Unassigned(accounts) = err {
                    // Name the blocked accounts so the wizard can surface them.
                    let body = Json(json!({
                        "error": {
                            "code": "UNASSIGNED_ACCOUNTS",
                            "message": err.to_string(),
                            "accounts": accounts,
                        }
                    }));
                    return (status, body).into_response();
                }
                (status, "ASSIGNMENT_ERROR", err.to_string())
            }
            AppError::Revise(err) => {
                let status = match err {
                    ReviseError::SectionOutOfBounds(_) => StatusCode::NOT_FOUND,
                    ReviseError::RegenerationInFlight(_) => StatusCode::CONFLICT,
                };
                (status, "REVISE_ERROR", err.to_string())
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::EmailGeneration => {
                tracing::error!("Email generation failed");
                let body = Json(json!({ "error": "Failed to generate email" }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
            AppError::Internal(err) => {
                tracing::error!("Internal error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_generation_maps_to_500() {
        let response = AppError::EmailGeneration.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_unassigned_accounts_map_to_422() {
        let err = AppError::Assignment(AssignmentError::Unassigned(vec!["acct-1".to_string()]));
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_regeneration_in_flight_maps_to_409() {
        let err = AppError::Revise(ReviseError::RegenerationInFlight(2));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
