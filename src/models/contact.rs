//! Professional contact document.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::fields::{double_option, normalize_text, parse_timestamp};
use super::validation::{is_valid_email, ValidationErrors};

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash,
)]
#[sqlx(type_name = "contact_relationship")]
pub enum Relationship {
    Recruiter,
    #[serde(rename = "Hiring Manager")]
    #[sqlx(rename = "Hiring Manager")]
    HiringManager,
    #[serde(rename = "Team Member")]
    #[sqlx(rename = "Team Member")]
    TeamMember,
    Referral,
    Networking,
    #[default]
    Other,
}

impl Relationship {
    pub const ALL: [Self; 6] = [
        Self::Recruiter,
        Self::HiringManager,
        Self::TeamMember,
        Self::Referral,
        Self::Networking,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recruiter => "Recruiter",
            Self::HiringManager => "Hiring Manager",
            Self::TeamMember => "Team Member",
            Self::Referral => "Referral",
            Self::Networking => "Networking",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == value)
            .ok_or_else(|| format!("'{value}' is not a valid relationship"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    pub relationship: Relationship,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_contact_date: Option<String>,
}

/// Partial update body. `name` and `relationship` ignore `null`; every other
/// field is cleared by `null` or a blank string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub company: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub position: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub last_contact_date: Option<Option<String>>,
}

impl Contact {
    /// Validate a create request and build the document it describes.
    pub fn from_create(input: CreateContact, now: DateTime<Utc>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = normalize_text(input.name).unwrap_or_else(|| {
            errors.add("name", "Contact name is required");
            String::new()
        });

        let relationship = match normalize_text(input.relationship) {
            Some(raw) => parse_relationship(&mut errors, &raw).unwrap_or_default(),
            None => Relationship::default(),
        };

        let email = normalize_email(&mut errors, input.email);
        let last_contact_date = normalize_text(input.last_contact_date)
            .and_then(|raw| parse_contact_date(&mut errors, &raw));

        errors.finish(Self {
            id: Uuid::new_v4(),
            name,
            company: normalize_text(input.company),
            position: normalize_text(input.position),
            email,
            phone: normalize_text(input.phone),
            linked_in: normalize_text(input.linked_in),
            relationship,
            notes: normalize_text(input.notes),
            last_contact_date,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge a patch onto this document and validate the result.
    pub fn merge(&self, patch: ContactPatch) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut merged = self.clone();

        if let Some(name) = patch.name {
            merged.name = normalize_text(Some(name)).unwrap_or_else(|| {
                errors.add("name", "Contact name is required");
                String::new()
            });
        }
        if let Some(value) = patch.company {
            merged.company = normalize_text(value);
        }
        if let Some(value) = patch.position {
            merged.position = normalize_text(value);
        }
        if let Some(value) = patch.email {
            merged.email = normalize_email(&mut errors, value);
        }
        if let Some(value) = patch.phone {
            merged.phone = normalize_text(value);
        }
        if let Some(value) = patch.linked_in {
            merged.linked_in = normalize_text(value);
        }
        if let Some(raw) = patch.relationship {
            if let Some(relationship) = parse_relationship(&mut errors, raw.trim()) {
                merged.relationship = relationship;
            }
        }
        if let Some(value) = patch.notes {
            merged.notes = normalize_text(value);
        }
        if let Some(value) = patch.last_contact_date {
            merged.last_contact_date =
                normalize_text(value).and_then(|raw| parse_contact_date(&mut errors, &raw));
        }

        errors.finish(merged)
    }
}

/// Trim, lowercase, then check the address format.
fn normalize_email(errors: &mut ValidationErrors, value: Option<String>) -> Option<String> {
    let email = normalize_text(value)?.to_lowercase();
    if !is_valid_email(&email) {
        errors.add("email", "Please provide a valid email address");
    }
    Some(email)
}

fn parse_relationship(errors: &mut ValidationErrors, raw: &str) -> Option<Relationship> {
    raw.parse()
        .map_err(|message: String| errors.add("relationship", message))
        .ok()
}

fn parse_contact_date(errors: &mut ValidationErrors, raw: &str) -> Option<DateTime<Utc>> {
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        errors.add("lastContactDate", format!("'{raw}' is not a valid date"));
    }
    parsed
}
