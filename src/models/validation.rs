//! Field-level validation errors shared by both entity schemas.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `local@domain.tld` with ASCII word characters, optional `.`/`-` separated
/// segments and a 2-3 character final label.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*",
        r"@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$",
    ))
    .expect("email pattern compiles")
});

/// Check an already trimmed and lowercased address against the email pattern.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field that failed validation for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single failing field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_fields(self) -> Vec<FieldError> {
        self.errors
    }

    /// Whether `field` is among the failures.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(value)` when nothing failed, otherwise the collected errors.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("jane.doe@example.com"));
        assert!(is_valid_email("j_doe-1@mail.example.co.uk"));
        assert!(is_valid_email("a@b.io"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("jane.doe"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane@example.comma"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email("jané@example.com"));
    }

    #[test]
    fn display_lists_every_field() {
        let mut errors = ValidationErrors::new();
        errors.add("company", "Company name is required");
        errors.add("position", "Position title is required");
        assert_eq!(
            errors.to_string(),
            "company: Company name is required, position: Position title is required"
        );
        assert!(errors.contains("position"));
        assert!(!errors.contains("status"));
    }

    #[test]
    fn finish_passes_value_through_when_empty() {
        assert_eq!(ValidationErrors::new().finish(7), Ok(7));
        assert!(ValidationErrors::single("name", "required").finish(7).is_err());
    }
}
