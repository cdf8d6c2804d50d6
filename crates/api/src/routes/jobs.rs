//! Batch job trigger routes.
//!
//! Jobs run inline and share one slot: a trigger that arrives while another
//! job holds the slot is rejected with 409.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use chrono::NaiveDate;
use fiscora_core::outcome::JobOutcome;
use fiscora_shared::AppError;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::MutexGuard;
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the job trigger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jobs/aggregate", post(aggregate))
        .route("/jobs/forecast", post(forecast))
}

/// Request body for the ledger aggregator.
#[derive(Debug, Deserialize)]
pub struct AggregateRequest {
    /// Fiscal year to aggregate from.
    pub fiscal_year: i32,
    /// Last ledger date included; defaults to today.
    pub cutoff_date: Option<NaiveDate>,
}

/// Request body for the forecast seeder.
#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    /// Fiscal year to seed.
    pub fiscal_year: i32,
    /// Calendar month of the last actual.
    pub actual_cutoff_month: u32,
    /// Calendar year of the last actual.
    pub actual_cutoff_year: i32,
    /// Target scenario; defaults to the configured forecast scenario.
    pub forecast_scenario: Option<String>,
}

/// Claims the job slot or fails with a conflict.
pub(crate) fn claim_slot(state: &AppState) -> Result<MutexGuard<'_, ()>, ApiError> {
    state
        .job_slot
        .try_lock()
        .map_err(|_| ApiError(AppError::Conflict("Another job is already running".to_string())))
}

/// Body for a job skipped because its scenario does not exist.
pub(crate) fn scenario_missing(name: &str) -> Value {
    json!({
        "status": "scenario_missing",
        "scenario": name,
        "count": 0
    })
}

/// POST `/jobs/aggregate` - Aggregate ledger into monthly actuals.
async fn aggregate(
    State(state): State<AppState>,
    Json(request): Json<AggregateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let _slot = claim_slot(&state)?;
    info!(fiscal_year = request.fiscal_year, "Aggregation requested");

    let outcome = state
        .jobs
        .aggregate_historical_data(request.fiscal_year, request.cutoff_date)
        .await?;

    let body = match &outcome {
        JobOutcome::Completed(summary) => json!({
            "status": "completed",
            "fiscal_year": request.fiscal_year,
            "count": outcome.count(),
            "created": summary.created,
            "updated": summary.updated
        }),
        JobOutcome::ScenarioMissing { name } => scenario_missing(name),
    };
    Ok((StatusCode::OK, Json(body)))
}

/// POST `/jobs/forecast` - Seed forecasts after the actual cutoff.
async fn forecast(
    State(state): State<AppState>,
    Json(request): Json<ForecastRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let _slot = claim_slot(&state)?;
    info!(fiscal_year = request.fiscal_year, "Forecast seeding requested");

    let outcome = state
        .jobs
        .initialize_forecast_data(
            request.fiscal_year,
            request.actual_cutoff_month,
            request.actual_cutoff_year,
            request.forecast_scenario.as_deref(),
        )
        .await?;

    let body = match &outcome {
        JobOutcome::Completed(summary) => json!({
            "status": "completed",
            "fiscal_year": request.fiscal_year,
            "count": outcome.count(),
            "forecast_months": summary.forecast_months,
            "slices": summary.slices
        }),
        JobOutcome::ScenarioMissing { name } => scenario_missing(name),
    };
    Ok((StatusCode::OK, Json(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{json_body, test_state};
    use axum::{body::Body, http::Request};
    use fiscora_db::ScenarioRepository;
    use rstest::rstest;
    use tower::ServiceExt;

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_aggregate_without_scenario_reports_missing() {
        let app = crate::create_router(test_state().await);

        let response = app
            .oneshot(post_json(
                "/api/v1/jobs/aggregate",
                &json!({ "fiscal_year": 2024, "cutoff_date": "2024-11-30" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "scenario_missing");
        assert_eq!(body["scenario"], "ACTUAL");
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_aggregate_completes_with_counts() {
        let state = test_state().await;
        ScenarioRepository::new((*state.db).clone())
            .ensure("ACTUAL", None)
            .await
            .unwrap();
        let app = crate::create_router(state);

        let response = app
            .oneshot(post_json(
                "/api/v1/jobs/aggregate",
                &json!({ "fiscal_year": 2024, "cutoff_date": "2024-11-30" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "completed");
        assert_eq!(body["count"], 0);
        assert_eq!(body["created"], 0);
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    #[tokio::test]
    async fn test_forecast_rejects_bad_month(#[case] month: u32) {
        let app = crate::create_router(test_state().await);

        let response = app
            .oneshot(post_json(
                "/api/v1/jobs/forecast",
                &json!({
                    "fiscal_year": 2024,
                    "actual_cutoff_month": month,
                    "actual_cutoff_year": 2024
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_forecast_with_unknown_scenario() {
        let app = crate::create_router(test_state().await);

        let response = app
            .oneshot(post_json(
                "/api/v1/jobs/forecast",
                &json!({
                    "fiscal_year": 2024,
                    "actual_cutoff_month": 11,
                    "actual_cutoff_year": 2024,
                    "forecast_scenario": "PLAN_B"
                }),
            ))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["status"], "scenario_missing");
        assert_eq!(body["scenario"], "PLAN_B");
    }

    #[tokio::test]
    async fn test_busy_slot_is_409() {
        let state = test_state().await;
        let _held = state.job_slot.clone().try_lock_owned().unwrap();
        let app = crate::create_router(state);

        let response = app
            .oneshot(post_json(
                "/api/v1/jobs/aggregate",
                &json!({ "fiscal_year": 2024 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
