//! Mapping of domain errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fiscora_db::JobError;
use fiscora_shared::AppError;
use serde_json::json;
use tracing::error;

/// An [`AppError`] rendered as `{ "error": CODE, "message": ... }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl From<JobError> for ApiError {
    fn from(error: JobError) -> Self {
        if error.is_validation() {
            return Self(AppError::Validation(error.to_string()));
        }
        error!(error = %error, "Job failed");
        Self(AppError::Database(error.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        // Internal details stay in the logs
        let message = if status.is_server_error() {
            "An error occurred".to_string()
        } else {
            self.0.to_string()
        };
        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::json_body;
    use fiscora_core::fiscal::FiscalError;
    use sea_orm::DbErr;

    #[tokio::test]
    async fn test_validation_error_is_400() {
        let response = ApiError::from(JobError::Fiscal(FiscalError::InvalidMonth(13))).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let response =
            ApiError::from(JobError::Database(DbErr::Custom("secret".into()))).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "An error occurred");
    }

    #[tokio::test]
    async fn test_conflict_is_409() {
        let response = ApiError(AppError::Conflict("busy".into())).into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
