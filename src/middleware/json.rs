//! JSON body extractor that reports malformed bodies as validation errors.

use axum::extract::FromRequest;

use crate::errors::AppError;

/// Drop-in replacement for `axum::Json` whose rejection is an [`AppError`],
/// so syntax errors and wrong JSON types produce the standard error body.
///
/// ```ignore
/// async fn handler(ApiJson(body): ApiJson<CreateContact>) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
