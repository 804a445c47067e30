//! HTTP clients for the external collaborator platform.
//!
//! Authentication and serverless function execution live outside this
//! system. Two thin clients cover the calls the admin console needs: invoking
//! the `create-user` function and requesting a password-reset email.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::CollaboratorsConfig;

/// Error from a collaborator call.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collaborator answered with a non-success status. Carries the
    /// human-readable message extracted from the response body.
    #[error("{0}")]
    Upstream(String),
}

/// Pull a message out of a collaborator error body, falling back to the
/// status code when the body is not the expected shape.
fn extract_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(|m| m.to_string())
        })
        .unwrap_or_else(|| format!("collaborator answered {}", status))
}

/// Client for the function-invocation endpoint.
pub struct FunctionsClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl FunctionsClient {
    pub fn new(config: &CollaboratorsConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        })
    }

    /// Invoke a named function with a JSON payload and return its JSON
    /// response.
    pub async fn invoke<P: Serialize>(
        &self,
        name: &str,
        payload: &P,
    ) -> Result<Value, CollaboratorError> {
        let url = format!("{}/functions/v1/{}", self.base_url, name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(CollaboratorError::Upstream(extract_error_message(
                status, &body,
            )))
        }
    }
}

#[derive(Debug, Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_to: Option<&'a str>,
}

/// Client for the auth service's password-recovery endpoint.
pub struct AuthClient {
    client: Client,
    base_url: String,
    service_key: String,
    reset_redirect_url: String,
}

impl AuthClient {
    pub fn new(config: &CollaboratorsConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
            reset_redirect_url: config.reset_redirect_url.clone(),
        })
    }

    /// Ask the auth service to send a password-reset email.
    pub async fn reset_password_for_email(&self, email: &str) -> Result<(), CollaboratorError> {
        let url = format!("{}/auth/v1/recover", self.base_url);
        let redirect_to = if self.reset_redirect_url.is_empty() {
            None
        } else {
            Some(self.reset_redirect_url.as_str())
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .json(&RecoverRequest { email, redirect_to })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(CollaboratorError::Upstream(extract_error_message(
                status, &body,
            )))
        }
    }
}
