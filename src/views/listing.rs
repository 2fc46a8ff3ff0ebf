//! List view models: categorical filter, free-text search and sort over an
//! already fetched collection.
//!
//! The pipeline always runs in the same order: filter by category, then by
//! search term, then sort.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::client::ApiClient;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::contact::{Contact, Relationship};

/// Categorical filter; `All` keeps everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "All" {
            Ok(Self::All)
        } else {
            value.parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(value) => value.fmt(f),
        }
    }
}

/// String comparison that ignores case first and only then falls back to a
/// case-sensitive tie-break, so "apple" sorts next to "Apple".
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Compare optional text; records lacking the value sort last whichever
/// direction is requested.
fn compare_missing_last(a: Option<&str>, b: Option<&str>, descending: bool) -> Ordering {
    fn present(v: Option<&str>) -> Option<&str> {
        v.filter(|s| !s.is_empty())
    }
    match (present(a), present(b)) {
        (Some(a), Some(b)) => {
            let ord = locale_compare(a, b);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive substring match over a fixed field set. Absent fields
/// never match.
fn matches_search(needle: &str, fields: &[Option<&str>]) -> bool {
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Lowercased search needle, or `None` when the trimmed term is empty.
fn search_needle(term: &str) -> Option<String> {
    let trimmed = term.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

macro_rules! sort_keys {
    (
        $name:ident { $($variant:ident => ($key:literal, $label:literal)),+ $(,)? }
        default $default:ident
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable identifier used on the command line.
            pub fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }

            /// Human label shown in the sort picker.
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|s| s.key() == value)
                    .ok_or_else(|| format!("unknown sort option '{value}'"))
            }
        }
    };
}

sort_keys!(ApplicationSort {
    DateDesc => ("dateDesc", "Date (Newest First)"),
    DateAsc => ("dateAsc", "Date (Oldest First)"),
    CompanyAsc => ("companyAsc", "Company (A-Z)"),
    CompanyDesc => ("companyDesc", "Company (Z-A)"),
    StatusAsc => ("statusAsc", "Status"),
} default DateDesc);

sort_keys!(ContactSort {
    NameAsc => ("nameAsc", "Name (A-Z)"),
    NameDesc => ("nameDesc", "Name (Z-A)"),
    CompanyAsc => ("companyAsc", "Company (A-Z)"),
    CompanyDesc => ("companyDesc", "Company (Z-A)"),
    RecentlyAdded => ("recentAsc", "Recently Added"),
} default NameAsc);

/// Result of running a query: the visible records plus the size of the
/// unfiltered collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOutcome<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListOutcome<T> {
    fn summary(&self, singular: &str, plural: &str, empty_hint: &str) -> String {
        match self.items.len() {
            0 if self.total > 0 => format!("No {plural} found. Try changing your filters."),
            0 if empty_hint.is_empty() => format!("No {plural} found."),
            0 => format!("No {plural} found. {empty_hint}"),
            1 => format!("Showing 1 {singular}"),
            n => format!("Showing {n} {plural}"),
        }
    }
}

impl ListOutcome<Application> {
    pub fn summary_line(&self) -> String {
        self.summary("application", "applications", "")
    }
}

impl ListOutcome<Contact> {
    pub fn summary_line(&self) -> String {
        self.summary("contact", "contacts", "Add your first contact to get started.")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationQuery {
    pub search: String,
    pub status: Filter<ApplicationStatus>,
    pub sort: ApplicationSort,
}

impl ApplicationQuery {
    /// Filter and sort; searches company, position and location.
    pub fn apply(&self, applications: &[Application]) -> ListOutcome<Application> {
        let needle = search_needle(&self.search);
        let mut items: Vec<Application> = applications
            .iter()
            .filter(|app| self.status.admits(&app.status))
            .filter(|app| {
                needle.as_deref().map_or(true, |needle| {
                    matches_search(
                        needle,
                        &[
                            Some(app.company.as_str()),
                            Some(app.position.as_str()),
                            app.location.as_deref(),
                        ],
                    )
                })
            })
            .cloned()
            .collect();

        match self.sort {
            ApplicationSort::DateDesc => {
                items.sort_by(|a, b| b.application_date.cmp(&a.application_date))
            }
            ApplicationSort::DateAsc => {
                items.sort_by(|a, b| a.application_date.cmp(&b.application_date))
            }
            ApplicationSort::CompanyAsc => items.sort_by(|a, b| {
                compare_missing_last(Some(&a.company), Some(&b.company), false)
            }),
            ApplicationSort::CompanyDesc => items.sort_by(|a, b| {
                compare_missing_last(Some(&a.company), Some(&b.company), true)
            }),
            ApplicationSort::StatusAsc => {
                items.sort_by(|a, b| locale_compare(a.status.as_str(), b.status.as_str()))
            }
        }

        ListOutcome {
            items,
            total: applications.len(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactQuery {
    pub search: String,
    pub relationship: Filter<Relationship>,
    pub sort: ContactSort,
}

impl ContactQuery {
    /// Filter and sort; searches name, company, position and email.
    pub fn apply(&self, contacts: &[Contact]) -> ListOutcome<Contact> {
        let needle = search_needle(&self.search);
        let mut items: Vec<Contact> = contacts
            .iter()
            .filter(|c| self.relationship.admits(&c.relationship))
            .filter(|c| {
                needle.as_deref().map_or(true, |needle| {
                    matches_search(
                        needle,
                        &[
                            Some(c.name.as_str()),
                            c.company.as_deref(),
                            c.position.as_deref(),
                            c.email.as_deref(),
                        ],
                    )
                })
            })
            .cloned()
            .collect();

        match self.sort {
            ContactSort::NameAsc => items.sort_by(|a, b| locale_compare(&a.name, &b.name)),
            ContactSort::NameDesc => items.sort_by(|a, b| locale_compare(&b.name, &a.name)),
            ContactSort::CompanyAsc => items.sort_by(|a, b| {
                compare_missing_last(a.company.as_deref(), b.company.as_deref(), false)
            }),
            ContactSort::CompanyDesc => items.sort_by(|a, b| {
                compare_missing_last(a.company.as_deref(), b.company.as_deref(), true)
            }),
            ContactSort::RecentlyAdded => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        ListOutcome {
            items,
            total: contacts.len(),
        }
    }
}

/// Applications list page state: the fetched collection or a load error.
#[derive(Debug, Clone, Default)]
pub struct ApplicationsList {
    pub applications: Vec<Application>,
    pub error: Option<String>,
}

impl ApplicationsList {
    pub async fn load(client: &ApiClient) -> Self {
        match client.applications().get_all().await {
            Ok(applications) => Self {
                applications,
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load applications");
                Self {
                    applications: Vec::new(),
                    error: Some("Failed to load applications. Please try again.".to_string()),
                }
            }
        }
    }

    pub fn view(&self, query: &ApplicationQuery) -> ListOutcome<Application> {
        query.apply(&self.applications)
    }
}

/// Contacts list page state.
#[derive(Debug, Clone, Default)]
pub struct ContactsList {
    pub contacts: Vec<Contact>,
    pub error: Option<String>,
}

impl ContactsList {
    pub async fn load(client: &ApiClient) -> Self {
        match client.contacts().get_all().await {
            Ok(contacts) => Self {
                contacts,
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load contacts");
                Self {
                    contacts: Vec::new(),
                    error: Some("Failed to load contacts. Please try again.".to_string()),
                }
            }
        }
    }

    pub fn view(&self, query: &ContactQuery) -> ListOutcome<Contact> {
        query.apply(&self.contacts)
    }
}
