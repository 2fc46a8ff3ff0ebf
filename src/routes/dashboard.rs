//! Dashboard routes: aggregated statistics for the overview page.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::services::dashboard::{self, Dashboard};
use crate::AppState;

/// GET /api/dashboard/stats: status counts plus the three newest applications.
pub async fn stats(State(state): State<AppState>) -> Result<Json<Dashboard>, AppError> {
    let dashboard = dashboard::get_stats(state.store.as_ref()).await?;
    Ok(Json(dashboard))
}
