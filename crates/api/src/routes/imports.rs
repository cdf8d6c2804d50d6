//! CSV import routes.
//!
//! The request body is the raw CSV file. Imports share the job slot with the
//! batch jobs.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use fiscora_core::import::ImportKind;
use fiscora_core::outcome::{ImportSummary, JobOutcome};
use fiscora_shared::AppError;
use serde_json::json;
use tracing::info;

use super::jobs::{claim_slot, scenario_missing};
use crate::{AppState, error::ApiError};

/// Largest accepted upload.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Creates the import routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/imports/templates/{kind}", get(template))
        .route("/imports/{kind}", post(import))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

fn parse_kind(kind: &str) -> Result<ImportKind, ApiError> {
    kind.parse::<ImportKind>()
        .map_err(|message| ApiError(AppError::NotFound(message)))
}

fn completed(summary: ImportSummary) -> serde_json::Value {
    json!({
        "status": "completed",
        "kind": summary.kind,
        "count": summary.rows
    })
}

/// POST `/imports/{kind}` - Import a CSV file.
async fn import(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    let _slot = claim_slot(&state)?;
    info!(%kind, bytes = body.len(), "Import requested");

    let response = match kind {
        ImportKind::GlTransactions => match state.imports.import_gl_transactions(&body).await? {
            JobOutcome::Completed(summary) => completed(summary),
            JobOutcome::ScenarioMissing { name } => scenario_missing(&name),
        },
        ImportKind::Accounts => completed(state.imports.import_accounts(&body).await?),
        ImportKind::DateDimensions => {
            completed(state.imports.import_date_dimensions(&body).await?)
        }
    };
    Ok((StatusCode::OK, Json(response)))
}

/// GET `/imports/templates/{kind}` - Download a blank CSV template.
async fn template(Path(kind): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", kind.file_name()),
            ),
        ],
        kind.template_csv(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{json_body, test_state};
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn post_csv(uri: &str, csv: &str) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "text/csv")
            .body(Body::from(csv.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_template_download() {
        let app = crate::create_router(test_state().await);

        let response = app
            .oneshot(
                Request::get("/api/v1/imports/templates/gl")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        assert!(
            response.headers()[header::CONTENT_DISPOSITION]
                .to_str()
                .unwrap()
                .contains("gl_transactions_template.csv")
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.starts_with(b"Date,Account Code,Fund Name"));
    }

    #[tokio::test]
    async fn test_unknown_kind_is_404() {
        let app = crate::create_router(test_state().await);

        let response = app
            .oneshot(post_csv("/api/v1/imports/budgets", "a,b\n"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_account_import_round_trip() {
        let state = test_state().await;
        let app = crate::create_router(state);
        let csv = format!(
            "{}1000,Cash,ASSET,Balance Sheet,Assets,,,,,TRUE,1,TRUE\n",
            ImportKind::Accounts.template_csv()
        );

        let response = app
            .oneshot(post_csv("/api/v1/imports/accounts", &csv))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "completed");
        assert_eq!(body["kind"], "accounts");
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn test_invalid_rows_are_400() {
        let app = crate::create_router(test_state().await);
        let csv = format!(
            "{}2024-10-05,five,40,10,October,Oct,4,Q4,2024,2024-10,2024-Q4\n",
            ImportKind::DateDimensions.template_csv()
        );

        let response = app
            .oneshot(post_csv("/api/v1/imports/date-dimensions", &csv))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["message"].as_str().unwrap().contains("Row 1"));
    }

    #[tokio::test]
    async fn test_gl_import_without_scenario() {
        let app = crate::create_router(test_state().await);

        let response = app
            .oneshot(post_csv(
                "/api/v1/imports/gl-transactions",
                &ImportKind::GlTransactions.template_csv(),
            ))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["status"], "scenario_missing");
    }
}
