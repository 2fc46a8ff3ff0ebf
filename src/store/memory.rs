use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ApplicationOrder, ContactOrder, Direction, Store};
use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::contact::Contact;

/// In-process store. Each collection sits behind its own lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    applications: RwLock<HashMap<Uuid, Application>>,
    contacts: RwLock<HashMap<Uuid, Contact>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn directed(ordering: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_applications(
        &self,
        order: ApplicationOrder,
    ) -> Result<Vec<Application>, AppError> {
        let mut items: Vec<Application> =
            self.applications.read().await.values().cloned().collect();
        items.sort_by(|a, b| {
            let primary = match order {
                ApplicationOrder::ApplicationDate(d) => {
                    directed(a.application_date.cmp(&b.application_date), d)
                }
                ApplicationOrder::Company(d) => directed(a.company.cmp(&b.company), d),
                ApplicationOrder::CreatedAt(d) => directed(a.created_at.cmp(&b.created_at), d),
            };
            primary.then_with(|| a.id.cmp(&b.id))
        });
        Ok(items)
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        Ok(self.applications.read().await.get(&id).cloned())
    }

    async fn insert_application(&self, application: &Application) -> Result<Application, AppError> {
        let mut guard = self.applications.write().await;
        if guard.contains_key(&application.id) {
            return Err(AppError::Internal(format!(
                "duplicate application id {}",
                application.id
            )));
        }
        guard.insert(application.id, application.clone());
        Ok(application.clone())
    }

    async fn replace_application(
        &self,
        application: &Application,
    ) -> Result<Option<Application>, AppError> {
        let mut guard = self.applications.write().await;
        Ok(guard.get_mut(&application.id).map(|slot| {
            *slot = application.clone();
            slot.clone()
        }))
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.applications.write().await.remove(&id).is_some())
    }

    async fn list_contacts(&self, order: ContactOrder) -> Result<Vec<Contact>, AppError> {
        let mut items: Vec<Contact> = self.contacts.read().await.values().cloned().collect();
        items.sort_by(|a, b| {
            let primary = match order {
                ContactOrder::Name(d) => directed(a.name.cmp(&b.name), d),
                ContactOrder::CreatedAt(d) => directed(a.created_at.cmp(&b.created_at), d),
            };
            primary.then_with(|| a.id.cmp(&b.id))
        });
        Ok(items)
    }

    async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>, AppError> {
        Ok(self.contacts.read().await.get(&id).cloned())
    }

    async fn insert_contact(&self, contact: &Contact) -> Result<Contact, AppError> {
        let mut guard = self.contacts.write().await;
        if guard.contains_key(&contact.id) {
            return Err(AppError::Internal(format!("duplicate contact id {}", contact.id)));
        }
        guard.insert(contact.id, contact.clone());
        Ok(contact.clone())
    }

    async fn replace_contact(&self, contact: &Contact) -> Result<Option<Contact>, AppError> {
        let mut guard = self.contacts.write().await;
        Ok(guard.get_mut(&contact.id).map(|slot| {
            *slot = contact.clone();
            slot.clone()
        }))
    }

    async fn delete_contact(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.contacts.write().await.remove(&id).is_some())
    }
}
