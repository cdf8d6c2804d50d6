//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod fiscal;
pub mod health;
pub mod imports;
pub mod jobs;

/// Creates the versioned API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(fiscal::routes())
        .merge(jobs::routes())
        .merge(imports::routes())
}
