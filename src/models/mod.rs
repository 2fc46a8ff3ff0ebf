//! Document models, request DTOs and their validation rules.

pub mod application;
pub mod contact;
pub mod fields;
pub mod validation;
