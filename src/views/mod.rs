//! Client-side view models built on top of [`crate::client::ApiClient`]:
//! list filtering and sorting, detail pages, forms and badge colors.

pub mod badge;
pub mod detail;
pub mod forms;
pub mod listing;

pub use detail::{ApplicationDetail, ContactDetail, ViewError};
pub use listing::{
    ApplicationQuery, ApplicationSort, ContactQuery, ContactSort, Filter, ListOutcome,
};
