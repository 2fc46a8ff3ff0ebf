//! Contact data access. Mirrors the application service; deletes never touch
//! applications that reference the contact.

use crate::errors::AppError;
use crate::models::contact::{Contact, ContactPatch, CreateContact};
use crate::models::fields::{next_update_timestamp, now, parse_id};
use crate::store::{ContactOrder, Store};

fn not_found() -> AppError {
    AppError::NotFound("Contact not found".to_string())
}

pub async fn create(store: &dyn Store, input: CreateContact) -> Result<Contact, AppError> {
    let contact = Contact::from_create(input, now())?;
    let saved = store.insert_contact(&contact).await?;
    tracing::info!(id = %saved.id, relationship = %saved.relationship, "Contact created");
    Ok(saved)
}

/// All contacts, by name ascending.
pub async fn list(store: &dyn Store) -> Result<Vec<Contact>, AppError> {
    list_ordered(store, ContactOrder::default()).await
}

pub async fn list_ordered(
    store: &dyn Store,
    order: ContactOrder,
) -> Result<Vec<Contact>, AppError> {
    store.list_contacts(order).await
}

pub async fn find_by_id(store: &dyn Store, id: &str) -> Result<Contact, AppError> {
    let id = parse_id(id).ok_or_else(not_found)?;
    store.get_contact(id).await?.ok_or_else(not_found)
}

pub async fn update_by_id(
    store: &dyn Store,
    id: &str,
    patch: ContactPatch,
) -> Result<Contact, AppError> {
    let existing = find_by_id(store, id).await?;
    update(store, existing, patch).await
}

/// Apply a partial update to an already loaded contact.
pub async fn update(
    store: &dyn Store,
    existing: Contact,
    patch: ContactPatch,
) -> Result<Contact, AppError> {
    let mut merged = existing.merge(patch)?;
    merged.updated_at = next_update_timestamp(existing.updated_at);

    let saved = store.replace_contact(&merged).await?.ok_or_else(not_found)?;
    tracing::info!(id = %saved.id, "Contact updated");
    Ok(saved)
}

pub async fn delete_by_id(store: &dyn Store, id: &str) -> Result<(), AppError> {
    let id = parse_id(id).ok_or_else(not_found)?;
    if !store.delete_contact(id).await? {
        return Err(not_found());
    }
    tracing::info!(%id, "Contact removed");
    Ok(())
}
