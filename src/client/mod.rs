//! HTTP client for the jobtrack API.
//!
//! One handle per resource, one method per operation. A failed call returns
//! the server's error body when it sent one, otherwise a generic
//! `Error <operation>` error. Nothing is retried or cached.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::errors::{ErrorBody, MessageResponse};
use crate::models::application::{Application, ApplicationPatch, CreateApplication};
use crate::models::contact::{Contact, ContactPatch, CreateContact};
use crate::services::dashboard::Dashboard;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a structured error body.
    #[error("{}", body.message)]
    Api { status: StatusCode, body: ErrorBody },

    /// Transport failure or a response that could not be decoded.
    #[error("Error {operation}")]
    Request {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// HTTP status when the server produced the error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request { source, .. } => source.status(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// The server's error body, if there was one.
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Api { body, .. } => Some(body),
            Self::Request { .. } => None,
        }
    }
}

/// Entry point for talking to a jobtrack server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn applications(&self) -> Applications<'_> {
        Applications { client: self }
    }

    pub fn contacts(&self) -> Contacts<'_> {
        Contacts { client: self }
    }

    /// `GET /api/dashboard/stats`
    pub async fn dashboard(&self) -> Result<Dashboard, ClientError> {
        self.send(self.http.get(self.url("/api/dashboard/stats")), "fetching dashboard")
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<T, ClientError> {
        let failed = |source: reqwest::Error| {
            tracing::warn!(operation, error = %source, "API request failed");
            ClientError::Request { operation, source }
        };

        let response = request.send().await.map_err(failed)?;
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(failed);
        }

        // Fall back to the generic error when the body is not ours.
        match response.json::<ErrorBody>().await {
            Ok(body) => {
                tracing::debug!(
                    operation,
                    %status,
                    message = %body.message,
                    "API returned an error"
                );
                Err(ClientError::Api { status, body })
            }
            Err(source) => Err(failed(source)),
        }
    }
}

/// `/api/applications`
#[derive(Debug, Clone, Copy)]
pub struct Applications<'a> {
    client: &'a ApiClient,
}

impl Applications<'_> {
    pub async fn get_all(&self) -> Result<Vec<Application>, ClientError> {
        let c = self.client;
        c.send(c.http.get(c.url("/api/applications")), "fetching applications")
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Application, ClientError> {
        let c = self.client;
        c.send(
            c.http.get(c.url(&format!("/api/applications/{id}"))),
            "fetching application",
        )
        .await
    }

    pub async fn create(&self, input: &CreateApplication) -> Result<Application, ClientError> {
        let c = self.client;
        c.send(
            c.http.post(c.url("/api/applications")).json(input),
            "creating application",
        )
        .await
    }

    pub async fn update(
        &self,
        id: &str,
        patch: &ApplicationPatch,
    ) -> Result<Application, ClientError> {
        let c = self.client;
        c.send(
            c.http.put(c.url(&format!("/api/applications/{id}"))).json(patch),
            "updating application",
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<MessageResponse, ClientError> {
        let c = self.client;
        c.send(
            c.http.delete(c.url(&format!("/api/applications/{id}"))),
            "deleting application",
        )
        .await
    }
}

/// `/api/contacts`
#[derive(Debug, Clone, Copy)]
pub struct Contacts<'a> {
    client: &'a ApiClient,
}

impl Contacts<'_> {
    pub async fn get_all(&self) -> Result<Vec<Contact>, ClientError> {
        let c = self.client;
        c.send(c.http.get(c.url("/api/contacts")), "fetching contacts")
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Contact, ClientError> {
        let c = self.client;
        c.send(
            c.http.get(c.url(&format!("/api/contacts/{id}"))),
            "fetching contact",
        )
        .await
    }

    pub async fn create(&self, input: &CreateContact) -> Result<Contact, ClientError> {
        let c = self.client;
        c.send(c.http.post(c.url("/api/contacts")).json(input), "creating contact")
            .await
    }

    pub async fn update(&self, id: &str, patch: &ContactPatch) -> Result<Contact, ClientError> {
        let c = self.client;
        c.send(
            c.http.put(c.url(&format!("/api/contacts/{id}"))).json(patch),
            "updating contact",
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<MessageResponse, ClientError> {
        let c = self.client;
        c.send(
            c.http.delete(c.url(&format!("/api/contacts/{id}"))),
            "deleting contact",
        )
        .await
    }
}
