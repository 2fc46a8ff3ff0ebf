//! Document persistence for the Applications and Contacts collections.
//!
//! The server owns exactly one `Store` handle, built at startup and shared
//! through [`crate::AppState`]. Every write is a single-document operation;
//! nothing spans both collections.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::Application;
use crate::models::contact::Contact;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Field an application listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationOrder {
    ApplicationDate(Direction),
    Company(Direction),
    CreatedAt(Direction),
}

impl Default for ApplicationOrder {
    fn default() -> Self {
        Self::ApplicationDate(Direction::Desc)
    }
}

/// Field a contact listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOrder {
    Name(Direction),
    CreatedAt(Direction),
}

impl Default for ContactOrder {
    fn default() -> Self {
        Self::Name(Direction::Asc)
    }
}

#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug {
    /// Short backend tag for logs and the readiness probe.
    fn backend(&self) -> &'static str;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_applications(
        &self,
        order: ApplicationOrder,
    ) -> Result<Vec<Application>, AppError>;
    async fn get_application(&self, id: Uuid) -> Result<Option<Application>, AppError>;
    async fn insert_application(&self, application: &Application) -> Result<Application, AppError>;
    /// Overwrite the stored document with the same id. `None` if it is gone.
    async fn replace_application(
        &self,
        application: &Application,
    ) -> Result<Option<Application>, AppError>;
    /// `true` if a document was removed.
    async fn delete_application(&self, id: Uuid) -> Result<bool, AppError>;

    async fn list_contacts(&self, order: ContactOrder) -> Result<Vec<Contact>, AppError>;
    async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>, AppError>;
    async fn insert_contact(&self, contact: &Contact) -> Result<Contact, AppError>;
    async fn replace_contact(&self, contact: &Contact) -> Result<Option<Contact>, AppError>;
    async fn delete_contact(&self, id: Uuid) -> Result<bool, AppError>;
}
