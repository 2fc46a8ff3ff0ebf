//! Dashboard statistics aggregated over the applications collection.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::application::{Application, ApplicationStatus};
use crate::services::application;
use crate::store::Store;

/// Size of the recent-applications widget.
pub const RECENT_LIMIT: usize = 3;

/// Status counts for the overview cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_applications: usize,
    pub applied: usize,
    /// Phone Screen, Interview and Technical Assessment combined.
    pub interviews: usize,
    pub offers: usize,
    pub bookmarked: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_applications: Vec<Application>,
}

/// Aggregate an already fetched collection.
pub fn summarize(applications: &[Application]) -> Dashboard {
    let mut stats = DashboardStats {
        total_applications: applications.len(),
        ..Default::default()
    };
    for app in applications {
        match app.status {
            ApplicationStatus::Applied => stats.applied += 1,
            ApplicationStatus::Offer => stats.offers += 1,
            ApplicationStatus::Bookmarked => stats.bookmarked += 1,
            status if status.is_interview_stage() => stats.interviews += 1,
            _ => {}
        }
    }

    let mut recent = applications.to_vec();
    recent.sort_by(|a, b| b.application_date.cmp(&a.application_date));
    recent.truncate(RECENT_LIMIT);

    Dashboard {
        stats,
        recent_applications: recent,
    }
}

/// Load every application and aggregate it.
pub async fn get_stats(store: &dyn Store) -> Result<Dashboard, AppError> {
    let applications = application::list(store).await?;
    Ok(summarize(&applications))
}
