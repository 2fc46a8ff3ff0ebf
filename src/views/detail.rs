//! Detail pages and the create/edit/delete actions reachable from them.
//!
//! Secondary lookups (the linked contact, the contact picker, related
//! applications) are best effort: when they fail the page still renders
//! without them.

use crate::client::{ApiClient, ClientError};
use crate::models::application::Application;
use crate::models::contact::Contact;
use crate::models::validation::FieldError;

use super::forms::{ApplicationForm, ContactForm};

const APPLICATION: &str = "application";
const CONTACT: &str = "contact";

/// Failure of a primary page action, phrased for display.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Could not load {0} details. Please try again.")]
    Load(&'static str, #[source] ClientError),

    #[error("Failed to load {0} data. Please try again.")]
    LoadForm(&'static str, #[source] ClientError),

    #[error("Failed to create {0}. Please try again.")]
    Create(&'static str, #[source] ClientError),

    #[error("Failed to update {0}. Please try again.")]
    Update(&'static str, #[source] ClientError),

    #[error("Failed to delete {0}. Please try again.")]
    Delete(&'static str, #[source] ClientError),
}

impl ViewError {
    pub fn client_error(&self) -> &ClientError {
        match self {
            Self::Load(_, e)
            | Self::LoadForm(_, e)
            | Self::Create(_, e)
            | Self::Update(_, e)
            | Self::Delete(_, e) => e,
        }
    }

    /// Per-field validation messages the server returned, if any.
    pub fn field_errors(&self) -> &[FieldError] {
        self.client_error()
            .body()
            .map(|body| body.fields.as_slice())
            .unwrap_or_default()
    }
}

/// Best-effort secondary lookup.
fn tolerate<T>(result: Result<T, ClientError>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, what, "Ignoring failed lookup");
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDetail {
    pub application: Application,
    /// The linked contact, when it still exists.
    pub contact: Option<Contact>,
    /// Options for the contact picker.
    pub contacts: Vec<Contact>,
}

impl ApplicationDetail {
    pub async fn load(client: &ApiClient, id: &str) -> Result<Self, ViewError> {
        let application = client
            .applications()
            .get_by_id(id)
            .await
            .map_err(|e| ViewError::Load(APPLICATION, e))?;

        let contact = linked_contact(client, &application).await;
        let contacts = tolerate(client.contacts().get_all().await, "contacts").unwrap_or_default();

        Ok(Self {
            application,
            contact,
            contacts,
        })
    }

    pub fn edit_form(&self) -> ApplicationForm {
        ApplicationForm::from_application(&self.application)
    }

    /// Submit an edit form and refresh the linked contact.
    pub async fn save(
        &mut self,
        client: &ApiClient,
        form: &ApplicationForm,
    ) -> Result<(), ViewError> {
        let id = self.application.id.to_string();
        self.application = client
            .applications()
            .update(&id, &form.to_patch())
            .await
            .map_err(|e| ViewError::Update(APPLICATION, e))?;
        self.contact = linked_contact(client, &self.application).await;
        Ok(())
    }

    pub async fn remove(self, client: &ApiClient) -> Result<(), ViewError> {
        client
            .applications()
            .delete(&self.application.id.to_string())
            .await
            .map(|_| ())
            .map_err(|e| ViewError::Delete(APPLICATION, e))
    }
}

async fn linked_contact(client: &ApiClient, application: &Application) -> Option<Contact> {
    let contact_id = application.contact_id?;
    tolerate(
        client.contacts().get_by_id(&contact_id.to_string()).await,
        "linked contact",
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactDetail {
    pub contact: Contact,
    /// Applications whose `contactId` points at this contact.
    pub applications: Vec<Application>,
}

impl ContactDetail {
    pub async fn load(client: &ApiClient, id: &str) -> Result<Self, ViewError> {
        let contact = client
            .contacts()
            .get_by_id(id)
            .await
            .map_err(|e| ViewError::Load(CONTACT, e))?;
        let applications = related_applications(client, &contact).await;
        Ok(Self {
            contact,
            applications,
        })
    }

    pub fn edit_form(&self) -> ContactForm {
        ContactForm::from_contact(&self.contact)
    }

    pub async fn save(&mut self, client: &ApiClient, form: &ContactForm) -> Result<(), ViewError> {
        let id = self.contact.id.to_string();
        self.contact = client
            .contacts()
            .update(&id, &form.to_patch())
            .await
            .map_err(|e| ViewError::Update(CONTACT, e))?;
        Ok(())
    }

    /// Delete the contact. Applications pointing at it keep their reference.
    pub async fn remove(self, client: &ApiClient) -> Result<(), ViewError> {
        client
            .contacts()
            .delete(&self.contact.id.to_string())
            .await
            .map(|_| ())
            .map_err(|e| ViewError::Delete(CONTACT, e))
    }
}

async fn related_applications(client: &ApiClient, contact: &Contact) -> Vec<Application> {
    tolerate(client.applications().get_all().await, "related applications")
        .unwrap_or_default()
        .into_iter()
        .filter(|app| app.contact_id == Some(contact.id))
        .collect()
}

/// Data for the edit-application page: the record plus picker options.
pub async fn load_application_form(
    client: &ApiClient,
    id: &str,
) -> Result<(ApplicationForm, Vec<Contact>), ViewError> {
    let application = client
        .applications()
        .get_by_id(id)
        .await
        .map_err(|e| ViewError::LoadForm(APPLICATION, e))?;
    let contacts = tolerate(client.contacts().get_all().await, "contacts").unwrap_or_default();
    Ok((ApplicationForm::from_application(&application), contacts))
}

pub async fn create_application(
    client: &ApiClient,
    form: &ApplicationForm,
) -> Result<Application, ViewError> {
    client
        .applications()
        .create(&form.to_create())
        .await
        .map_err(|e| ViewError::Create(APPLICATION, e))
}

pub async fn create_contact(client: &ApiClient, form: &ContactForm) -> Result<Contact, ViewError> {
    client
        .contacts()
        .create(&form.to_create())
        .await
        .map_err(|e| ViewError::Create(CONTACT, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorBody;
    use reqwest::StatusCode;

    fn api_error(fields: Vec<FieldError>) -> ClientError {
        ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                message: "Validation failed".to_string(),
                error: None,
                fields,
            },
        }
    }

    #[test]
    fn messages_name_the_resource() {
        let err = ViewError::Load(APPLICATION, api_error(vec![]));
        assert_eq!(err.to_string(), "Could not load application details. Please try again.");
        let err = ViewError::Delete(CONTACT, api_error(vec![]));
        assert_eq!(err.to_string(), "Failed to delete contact. Please try again.");
        let err = ViewError::LoadForm(APPLICATION, api_error(vec![]));
        assert_eq!(err.to_string(), "Failed to load application data. Please try again.");
    }

    #[test]
    fn field_errors_come_from_server_body() {
        let err = ViewError::Create(
            CONTACT,
            api_error(vec![FieldError {
                field: "name".to_string(),
                message: "Contact name is required".to_string(),
            }]),
        );
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.field_errors()[0].field, "name");
    }
}
