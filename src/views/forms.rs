//! Add/edit form state. Inputs are held as raw text, the way they were typed,
//! and converted into request bodies on submit.

use crate::models::application::{
    Application, ApplicationPatch, ApplicationStatus, CreateApplication,
};
use crate::models::contact::{Contact, ContactPatch, CreateContact, Relationship};
use crate::models::fields::normalize_text;

/// Format used by date inputs.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Blank input becomes an explicit clear.
fn clearable(value: &str) -> Option<Option<String>> {
    Some(normalize_text(Some(value.to_string())))
}

fn optional(value: &str) -> Option<String> {
    normalize_text(Some(value.to_string()))
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Date inputs only hold the day, so an untouched input is left out of the
/// patch to keep the stored time of day.
fn edited<'a>(input: &'a str, prefilled: Option<&str>) -> Option<&'a str> {
    (prefilled != Some(input)).then_some(input)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationForm {
    pub company: String,
    pub position: String,
    pub job_description: String,
    pub job_link: String,
    pub location: String,
    pub salary: String,
    pub application_date: String,
    pub status: String,
    pub next_steps: String,
    pub notes: String,
    pub contact_id: String,
    /// `application_date` as prefilled from the stored record.
    pub prefilled_date: Option<String>,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self {
            company: String::new(),
            position: String::new(),
            job_description: String::new(),
            job_link: String::new(),
            location: String::new(),
            salary: String::new(),
            application_date: chrono::Utc::now().format(DATE_INPUT_FORMAT).to_string(),
            status: ApplicationStatus::default().to_string(),
            next_steps: String::new(),
            notes: String::new(),
            contact_id: String::new(),
            prefilled_date: None,
        }
    }
}

impl ApplicationForm {
    pub fn status_options() -> &'static [ApplicationStatus] {
        &ApplicationStatus::ALL
    }

    /// Prefill an edit form.
    pub fn from_application(app: &Application) -> Self {
        let application_date = app.application_date.format(DATE_INPUT_FORMAT).to_string();
        Self {
            company: app.company.clone(),
            position: app.position.clone(),
            job_description: text(&app.job_description),
            job_link: text(&app.job_link),
            location: text(&app.location),
            salary: text(&app.salary),
            prefilled_date: Some(application_date.clone()),
            application_date,
            status: app.status.to_string(),
            next_steps: text(&app.next_steps),
            notes: text(&app.notes),
            contact_id: app.contact_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    /// Create body; blank inputs are left out so server defaults apply.
    pub fn to_create(&self) -> CreateApplication {
        CreateApplication {
            company: optional(&self.company),
            position: optional(&self.position),
            job_description: optional(&self.job_description),
            job_link: optional(&self.job_link),
            location: optional(&self.location),
            salary: optional(&self.salary),
            application_date: optional(&self.application_date),
            status: optional(&self.status),
            next_steps: optional(&self.next_steps),
            notes: optional(&self.notes),
            contact_id: optional(&self.contact_id),
        }
    }

    /// Patch body carrying every field except an untouched date; blank
    /// optional inputs clear.
    pub fn to_patch(&self) -> ApplicationPatch {
        ApplicationPatch {
            company: Some(self.company.clone()),
            position: Some(self.position.clone()),
            job_description: clearable(&self.job_description),
            job_link: clearable(&self.job_link),
            location: clearable(&self.location),
            salary: clearable(&self.salary),
            application_date: edited(&self.application_date, self.prefilled_date.as_deref())
                .map(str::to_string),
            status: Some(self.status.clone()),
            next_steps: clearable(&self.next_steps),
            notes: clearable(&self.notes),
            contact_id: clearable(&self.contact_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub company: String,
    pub position: String,
    pub email: String,
    pub phone: String,
    pub linked_in: String,
    pub relationship: String,
    pub notes: String,
    pub last_contact_date: String,
    /// `last_contact_date` as prefilled from the stored record.
    pub prefilled_date: Option<String>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            company: String::new(),
            position: String::new(),
            email: String::new(),
            phone: String::new(),
            linked_in: String::new(),
            relationship: Relationship::default().to_string(),
            notes: String::new(),
            last_contact_date: String::new(),
            prefilled_date: None,
        }
    }
}

impl ContactForm {
    pub fn relationship_options() -> &'static [Relationship] {
        &Relationship::ALL
    }

    pub fn from_contact(contact: &Contact) -> Self {
        let last_contact_date = contact
            .last_contact_date
            .map(|d| d.format(DATE_INPUT_FORMAT).to_string())
            .unwrap_or_default();
        Self {
            name: contact.name.clone(),
            company: text(&contact.company),
            position: text(&contact.position),
            email: text(&contact.email),
            phone: text(&contact.phone),
            linked_in: text(&contact.linked_in),
            relationship: contact.relationship.to_string(),
            notes: text(&contact.notes),
            prefilled_date: Some(last_contact_date.clone()),
            last_contact_date,
        }
    }

    pub fn to_create(&self) -> CreateContact {
        CreateContact {
            name: optional(&self.name),
            company: optional(&self.company),
            position: optional(&self.position),
            email: optional(&self.email),
            phone: optional(&self.phone),
            linked_in: optional(&self.linked_in),
            relationship: optional(&self.relationship),
            notes: optional(&self.notes),
            last_contact_date: optional(&self.last_contact_date),
        }
    }

    pub fn to_patch(&self) -> ContactPatch {
        ContactPatch {
            name: Some(self.name.clone()),
            company: clearable(&self.company),
            position: clearable(&self.position),
            email: clearable(&self.email),
            phone: clearable(&self.phone),
            linked_in: clearable(&self.linked_in),
            relationship: Some(self.relationship.clone()),
            notes: clearable(&self.notes),
            last_contact_date: edited(&self.last_contact_date, self.prefilled_date.as_deref())
                .and_then(clearable),
        }
    }
}
