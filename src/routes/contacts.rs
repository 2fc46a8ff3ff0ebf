//! Contact routes: same shape as the application routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::{AppError, MessageResponse};
use crate::middleware::json::ApiJson;
use crate::models::contact::{Contact, ContactPatch, CreateContact};
use crate::services::contact as contact_service;
use crate::AppState;

/// GET /api/contacts: every contact, by name.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = contact_service::list(state.store.as_ref()).await?;
    Ok(Json(contacts))
}

/// GET /api/contacts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, AppError> {
    let contact = contact_service::find_by_id(state.store.as_ref(), &id).await?;
    Ok(Json(contact))
}

/// POST /api/contacts
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateContact>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    let contact = contact_service::create(state.store.as_ref(), body).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT /api/contacts/{id}: an unknown id is reported before a bad body.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<ApiJson<ContactPatch>, AppError>,
) -> Result<Json<Contact>, AppError> {
    let store = state.store.as_ref();
    let existing = contact_service::find_by_id(store, &id).await?;
    let ApiJson(patch) = body?;
    let contact = contact_service::update(store, existing, patch).await?;
    Ok(Json(contact))
}

/// DELETE /api/contacts/{id}: applications pointing at the contact keep
/// their `contactId`.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    contact_service::delete_by_id(state.store.as_ref(), &id).await?;
    Ok(MessageResponse::new("Contact removed"))
}
