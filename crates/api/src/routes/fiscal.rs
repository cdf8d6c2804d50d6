//! Fiscal calendar routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::NaiveDate;
use fiscora_core::fiscal::FiscalCalendar;
use fiscora_shared::AppError;
use serde::Serialize;

use crate::{AppState, error::ApiError};

/// Creates the fiscal calendar routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fiscal/current", get(current_fiscal_year))
        .route("/fiscal/{fiscal_year}/months", get(fiscal_months))
}

/// One month of a fiscal year.
#[derive(Debug, Serialize)]
pub struct FiscalMonthResponse {
    /// Position within the fiscal year (1-12).
    pub period: u32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// A fiscal year with its months in fiscal order.
#[derive(Debug, Serialize)]
pub struct FiscalYearResponse {
    /// Fiscal year label.
    pub fiscal_year: i32,
    /// First calendar month of the fiscal year.
    pub start_month: u32,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// The twelve months.
    pub months: Vec<FiscalMonthResponse>,
}

fn describe(calendar: &FiscalCalendar, fiscal_year: i32) -> Result<FiscalYearResponse, ApiError> {
    let invalid = |e: fiscora_core::fiscal::FiscalError| AppError::Validation(e.to_string());
    let start_date = calendar.start_date(fiscal_year).map_err(invalid)?;
    let end_date = calendar.end_date(fiscal_year).map_err(invalid)?;

    let months = calendar
        .months(fiscal_year)
        .into_iter()
        .zip(1..)
        .map(|(month, period)| FiscalMonthResponse {
            period,
            month: month.month,
            year: month.year,
        })
        .collect();

    Ok(FiscalYearResponse {
        fiscal_year,
        start_month: calendar.start_month(),
        start_date,
        end_date,
        months,
    })
}

/// GET `/fiscal/current` - Fiscal year containing today.
async fn current_fiscal_year(
    State(state): State<AppState>,
) -> Result<Json<FiscalYearResponse>, ApiError> {
    let calendar = state.jobs.calendar();
    let today = chrono::Utc::now().date_naive();
    describe(calendar, calendar.current_fiscal_year(today)).map(Json)
}

/// GET `/fiscal/{fiscal_year}/months` - Months of a fiscal year in order.
async fn fiscal_months(
    State(state): State<AppState>,
    Path(fiscal_year): Path<i32>,
) -> Result<Json<FiscalYearResponse>, ApiError> {
    describe(state.jobs.calendar(), fiscal_year).map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{json_body, test_state};
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_fiscal_months_in_order() {
        let app = crate::create_router(test_state().await);

        let response = app
            .oneshot(
                Request::get("/api/v1/fiscal/2024/months")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["start_date"], "2024-10-01");
        assert_eq!(body["end_date"], "2025-09-30");
        let months = body["months"].as_array().unwrap();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0]["month"], 10);
        assert_eq!(months[0]["year"], 2024);
        assert_eq!(months[3]["period"], 4);
        assert_eq!(months[3]["month"], 1);
        assert_eq!(months[3]["year"], 2025);
    }

    #[tokio::test]
    async fn test_current_fiscal_year_contains_today() {
        let state = test_state().await;
        let expected = state
            .jobs
            .calendar()
            .current_fiscal_year(chrono::Utc::now().date_naive());
        let app = crate::create_router(state);

        let response = app
            .oneshot(
                Request::get("/api/v1/fiscal/current")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["fiscal_year"], expected);
    }

    #[tokio::test]
    async fn test_unrepresentable_year_is_rejected() {
        let app = crate::create_router(test_state().await);

        let response = app
            .oneshot(
                Request::get(format!("/api/v1/fiscal/{}/months", i32::MAX))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
