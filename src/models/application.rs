//! Job application document: a tracked opportunity with a status lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::fields::{double_option, normalize_text, parse_id, parse_timestamp};
use super::validation::ValidationErrors;

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash,
)]
#[sqlx(type_name = "application_status")]
pub enum ApplicationStatus {
    #[default]
    Bookmarked,
    Applied,
    #[serde(rename = "Phone Screen")]
    #[sqlx(rename = "Phone Screen")]
    PhoneScreen,
    Interview,
    #[serde(rename = "Technical Assessment")]
    #[sqlx(rename = "Technical Assessment")]
    TechnicalAssessment,
    Offer,
    Rejected,
    Accepted,
    Withdrawn,
}

impl ApplicationStatus {
    /// Every status in declaration order. Drives validation, form dropdowns
    /// and the badge table.
    pub const ALL: [Self; 9] = [
        Self::Bookmarked,
        Self::Applied,
        Self::PhoneScreen,
        Self::Interview,
        Self::TechnicalAssessment,
        Self::Offer,
        Self::Rejected,
        Self::Accepted,
        Self::Withdrawn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bookmarked => "Bookmarked",
            Self::Applied => "Applied",
            Self::PhoneScreen => "Phone Screen",
            Self::Interview => "Interview",
            Self::TechnicalAssessment => "Technical Assessment",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
            Self::Accepted => "Accepted",
            Self::Withdrawn => "Withdrawn",
        }
    }

    /// Statuses counted as "interviews" on the dashboard.
    pub fn is_interview_stage(self) -> bool {
        matches!(
            self,
            Self::PhoneScreen | Self::Interview | Self::TechnicalAssessment
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| format!("'{value}' is not a valid status"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub application_date: DateTime<Utc>,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Weak reference to a contact; the contact may no longer exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create request body. Everything arrives as raw text so that a bad enum
/// value or date is reported per field instead of rejecting the whole body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
}

/// Partial update body.
///
/// `company`, `position`, `applicationDate` and `status` always hold a value,
/// so a missing key or `null` leaves them unchanged. The remaining fields are
/// optional on the document: a missing key leaves them unchanged, `null` or a
/// blank string clears them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub job_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub job_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub salary: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<Option<String>>,
}

impl Application {
    /// Validate a create request and build the document it describes.
    pub fn from_create(
        input: CreateApplication,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let company = required(&mut errors, "company", input.company, "Company name is required");
        let position = required(
            &mut errors,
            "position",
            input.position,
            "Position title is required",
        );

        let application_date = match normalize_text(input.application_date) {
            Some(raw) => parse_date(&mut errors, &raw).unwrap_or(now),
            None => now,
        };

        let status = match normalize_text(input.status) {
            Some(raw) => parse_status(&mut errors, &raw).unwrap_or_default(),
            None => ApplicationStatus::default(),
        };

        let contact_id = normalize_text(input.contact_id)
            .and_then(|raw| parse_contact_id(&mut errors, &raw));

        errors.finish(Self {
            id: Uuid::new_v4(),
            company,
            position,
            job_description: normalize_text(input.job_description),
            job_link: normalize_text(input.job_link),
            location: normalize_text(input.location),
            salary: normalize_text(input.salary),
            application_date,
            status,
            next_steps: normalize_text(input.next_steps),
            notes: normalize_text(input.notes),
            contact_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge a patch onto this document and validate the result.
    ///
    /// Identity and timestamps are carried over untouched; the caller owns
    /// `updated_at`.
    pub fn merge(&self, patch: ApplicationPatch) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut merged = self.clone();

        if let Some(company) = patch.company {
            merged.company =
                required(&mut errors, "company", Some(company), "Company name is required");
        }
        if let Some(position) = patch.position {
            merged.position = required(
                &mut errors,
                "position",
                Some(position),
                "Position title is required",
            );
        }
        if let Some(value) = patch.job_description {
            merged.job_description = normalize_text(value);
        }
        if let Some(value) = patch.job_link {
            merged.job_link = normalize_text(value);
        }
        if let Some(value) = patch.location {
            merged.location = normalize_text(value);
        }
        if let Some(value) = patch.salary {
            merged.salary = normalize_text(value);
        }
        // A cleared date input keeps the stored date.
        if let Some(raw) = normalize_text(patch.application_date) {
            if let Some(date) = parse_date(&mut errors, &raw) {
                merged.application_date = date;
            }
        }
        if let Some(raw) = patch.status {
            if let Some(status) = parse_status(&mut errors, raw.trim()) {
                merged.status = status;
            }
        }
        if let Some(value) = patch.next_steps {
            merged.next_steps = normalize_text(value);
        }
        if let Some(value) = patch.notes {
            merged.notes = normalize_text(value);
        }
        if let Some(value) = patch.contact_id {
            merged.contact_id =
                normalize_text(value).and_then(|raw| parse_contact_id(&mut errors, &raw));
        }

        errors.finish(merged)
    }
}

fn required(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
    message: &str,
) -> String {
    normalize_text(value).unwrap_or_else(|| {
        errors.add(field, message);
        String::new()
    })
}

fn parse_date(errors: &mut ValidationErrors, raw: &str) -> Option<DateTime<Utc>> {
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        errors.add("applicationDate", format!("'{raw}' is not a valid date"));
    }
    parsed
}

fn parse_status(errors: &mut ValidationErrors, raw: &str) -> Option<ApplicationStatus> {
    raw.parse()
        .map_err(|message: String| errors.add("status", message))
        .ok()
}

fn parse_contact_id(errors: &mut ValidationErrors, raw: &str) -> Option<Uuid> {
    let parsed = parse_id(raw);
    if parsed.is_none() {
        errors.add("contactId", format!("'{raw}' is not a valid contact id"));
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn minimal() -> CreateApplication {
        CreateApplication {
            company: Some("Acme".to_string()),
            position: Some("Engineer".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn status_serializes_with_display_label() {
        let json = serde_json::to_string(&ApplicationStatus::TechnicalAssessment).unwrap();
        assert_eq!(json, "\"Technical Assessment\"");
        let parsed: ApplicationStatus = serde_json::from_str("\"Phone Screen\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::PhoneScreen);
    }

    #[test]
    fn status_table_round_trips_through_labels() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>(), Ok(status));
        }
        assert!("phone screen".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn create_applies_defaults_and_trims() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let input = CreateApplication {
            company: Some("  Acme Corp ".to_string()),
            location: Some("   ".to_string()),
            ..minimal()
        };
        let app = Application::from_create(input, now).unwrap();
        assert_eq!(app.company, "Acme Corp");
        assert_eq!(app.location, None);
        assert_eq!(app.status, ApplicationStatus::Bookmarked);
        assert_eq!(app.application_date, now);
        assert_eq!(app.created_at, app.updated_at);
    }

    #[test]
    fn create_blank_status_falls_back_to_default() {
        let input = CreateApplication {
            status: Some(String::new()),
            ..minimal()
        };
        let app = Application::from_create(input, Utc::now()).unwrap();
        assert_eq!(app.status, ApplicationStatus::Bookmarked);
    }

    #[test]
    fn create_reports_every_failing_field() {
        let input = CreateApplication {
            company: Some("   ".to_string()),
            position: None,
            status: Some("Ghosted".to_string()),
            contact_id: Some("abc".to_string()),
            ..Default::default()
        };
        let errors = Application::from_create(input, Utc::now()).unwrap_err();
        assert!(errors.contains("company"));
        assert!(errors.contains("position"));
        assert!(errors.contains("status"));
        assert!(errors.contains("contactId"));
        assert_eq!(errors.fields().len(), 4);
    }

    #[test]
    fn create_parses_form_date() {
        let input = CreateApplication {
            application_date: Some("2024-02-29".to_string()),
            ..minimal()
        };
        let app = Application::from_create(input, Utc::now()).unwrap();
        assert_eq!(app.application_date.day(), 29);
    }

    #[test]
    fn merge_changes_only_supplied_fields() {
        let original = Application::from_create(
            CreateApplication {
                location: Some("Remote".to_string()),
                notes: Some("first call went well".to_string()),
                ..minimal()
            },
            Utc::now(),
        )
        .unwrap();

        let patch = ApplicationPatch {
            status: Some("Interview".to_string()),
            notes: Some(None),
            ..Default::default()
        };
        let merged = original.merge(patch).unwrap();

        assert_eq!(merged.status, ApplicationStatus::Interview);
        assert_eq!(merged.notes, None);
        assert_eq!(merged.location.as_deref(), Some("Remote"));
        assert_eq!(merged.company, original.company);
        assert_eq!(merged.id, original.id);
    }

    #[test]
    fn merge_rejects_blank_required_field() {
        let original = Application::from_create(minimal(), Utc::now()).unwrap();
        let patch = ApplicationPatch {
            company: Some("  ".to_string()),
            status: Some("Nope".to_string()),
            ..Default::default()
        };
        let errors = original.merge(patch).unwrap_err();
        assert!(errors.contains("company"));
        assert!(errors.contains("status"));
    }

    #[test]
    fn patch_distinguishes_missing_from_null() {
        let patch: ApplicationPatch =
            serde_json::from_str(r#"{"notes": null, "status": "Offer"}"#).unwrap();
        assert_eq!(patch.notes, Some(None));
        assert_eq!(patch.location, None);
        assert_eq!(patch.status.as_deref(), Some("Offer"));
    }

    #[test]
    fn serialization_uses_camel_case_and_omits_absent_fields() {
        let app = Application::from_create(minimal(), Utc::now()).unwrap();
        let json = serde_json::to_value(&app).unwrap();
        assert!(json.get("applicationDate").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("jobDescription").is_none());
        assert_eq!(json["status"], "Bookmarked");
    }
}
