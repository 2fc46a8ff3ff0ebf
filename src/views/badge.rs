//! Display variants for status and relationship badges.

use std::fmt;

use crate::models::application::ApplicationStatus;
use crate::models::contact::Relationship;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Dark,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Dark => "dark",
        }
    }

    /// ANSI SGR color code used by the terminal client.
    pub fn ansi_code(self) -> u8 {
        match self {
            Self::Primary => 34,
            Self::Secondary => 37,
            Self::Success => 32,
            Self::Danger => 31,
            Self::Warning => 33,
            Self::Info => 36,
            Self::Dark => 90,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Indexed by declaration order of the enums.
const STATUS_VARIANTS: [Variant; ApplicationStatus::ALL.len()] = [
    Variant::Secondary, // Bookmarked
    Variant::Primary,   // Applied
    Variant::Info,      // Phone Screen
    Variant::Warning,   // Interview
    Variant::Dark,      // Technical Assessment
    Variant::Success,   // Offer
    Variant::Danger,    // Rejected
    Variant::Success,   // Accepted
    Variant::Danger,    // Withdrawn
];

const RELATIONSHIP_VARIANTS: [Variant; Relationship::ALL.len()] = [
    Variant::Primary,   // Recruiter
    Variant::Success,   // Hiring Manager
    Variant::Info,      // Team Member
    Variant::Warning,   // Referral
    Variant::Secondary, // Networking
    Variant::Dark,      // Other
];

pub fn status_variant(status: ApplicationStatus) -> Variant {
    STATUS_VARIANTS[status as usize]
}

pub fn relationship_variant(relationship: Relationship) -> Variant {
    RELATIONSHIP_VARIANTS[relationship as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table_follows_declaration_order() {
        for (index, status) in ApplicationStatus::ALL.into_iter().enumerate() {
            assert_eq!(status as usize, index);
        }
        for (index, relationship) in Relationship::ALL.into_iter().enumerate() {
            assert_eq!(relationship as usize, index);
        }
    }

    #[test]
    fn status_variants() {
        assert_eq!(status_variant(ApplicationStatus::Bookmarked), Variant::Secondary);
        assert_eq!(status_variant(ApplicationStatus::PhoneScreen), Variant::Info);
        assert_eq!(status_variant(ApplicationStatus::TechnicalAssessment), Variant::Dark);
        assert_eq!(status_variant(ApplicationStatus::Accepted), Variant::Success);
        assert_eq!(status_variant(ApplicationStatus::Withdrawn), Variant::Danger);
    }

    #[test]
    fn relationship_variants() {
        assert_eq!(relationship_variant(Relationship::HiringManager), Variant::Success);
        assert_eq!(relationship_variant(Relationship::Networking), Variant::Secondary);
        assert_eq!(relationship_variant(Relationship::Other).to_string(), "dark");
    }
}
