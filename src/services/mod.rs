//! Business logic services.

pub mod application;
pub mod contact;
pub mod dashboard;
