//! Application routes: list, get, create, partial update, delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::{AppError, MessageResponse};
use crate::middleware::json::ApiJson;
use crate::models::application::{Application, ApplicationPatch, CreateApplication};
use crate::services::application as app_service;
use crate::AppState;

/// GET /api/applications: every application, newest application date first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Application>>, AppError> {
    let applications = app_service::list(state.store.as_ref()).await?;
    Ok(Json(applications))
}

/// GET /api/applications/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Application>, AppError> {
    let application = app_service::find_by_id(state.store.as_ref(), &id).await?;
    Ok(Json(application))
}

/// POST /api/applications
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateApplication>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let application = app_service::create(state.store.as_ref(), body).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// PUT /api/applications/{id}: only fields present in the body change. An
/// unknown id is reported before a bad body.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<ApiJson<ApplicationPatch>, AppError>,
) -> Result<Json<Application>, AppError> {
    let store = state.store.as_ref();
    let existing = app_service::find_by_id(store, &id).await?;
    let ApiJson(patch) = body?;
    let application = app_service::update(store, existing, patch).await?;
    Ok(Json(application))
}

/// DELETE /api/applications/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    app_service::delete_by_id(state.store.as_ref(), &id).await?;
    Ok(MessageResponse::new("Application removed"))
}
