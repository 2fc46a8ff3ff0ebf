//! Application data access: create, list, lookup, partial update, delete.

use crate::errors::AppError;
use crate::models::application::{Application, ApplicationPatch, CreateApplication};
use crate::models::fields::{next_update_timestamp, now, parse_id};
use crate::store::{ApplicationOrder, Store};

fn not_found() -> AppError {
    AppError::NotFound("Application not found".to_string())
}

/// Validate and persist a new application.
pub async fn create(store: &dyn Store, input: CreateApplication) -> Result<Application, AppError> {
    let application = Application::from_create(input, now())?;
    let saved = store.insert_application(&application).await?;
    tracing::info!(
        id = %saved.id,
        company = %saved.company,
        status = %saved.status,
        "Application created"
    );
    Ok(saved)
}

/// All applications, newest application date first.
pub async fn list(store: &dyn Store) -> Result<Vec<Application>, AppError> {
    list_ordered(store, ApplicationOrder::default()).await
}

pub async fn list_ordered(
    store: &dyn Store,
    order: ApplicationOrder,
) -> Result<Vec<Application>, AppError> {
    store.list_applications(order).await
}

/// Find an application by ID. Malformed IDs are reported as not found.
pub async fn find_by_id(store: &dyn Store, id: &str) -> Result<Application, AppError> {
    let id = parse_id(id).ok_or_else(not_found)?;
    store.get_application(id).await?.ok_or_else(not_found)
}

/// Apply a partial update. Only fields present in `patch` change.
pub async fn update_by_id(
    store: &dyn Store,
    id: &str,
    patch: ApplicationPatch,
) -> Result<Application, AppError> {
    let existing = find_by_id(store, id).await?;
    update(store, existing, patch).await
}

/// Apply a partial update to an already loaded application.
pub async fn update(
    store: &dyn Store,
    existing: Application,
    patch: ApplicationPatch,
) -> Result<Application, AppError> {
    let mut merged = existing.merge(patch)?;
    merged.updated_at = next_update_timestamp(existing.updated_at);

    let saved = store
        .replace_application(&merged)
        .await?
        .ok_or_else(not_found)?;
    tracing::info!(id = %saved.id, status = %saved.status, "Application updated");
    Ok(saved)
}

/// Remove an application. The referenced contact is left alone.
pub async fn delete_by_id(store: &dyn Store, id: &str) -> Result<(), AppError> {
    let id = parse_id(id).ok_or_else(not_found)?;
    if !store.delete_application(id).await? {
        return Err(not_found());
    }
    tracing::info!(%id, "Application removed");
    Ok(())
}
