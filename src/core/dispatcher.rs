//! Single-shot requests against the `generateContent` endpoint.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

use crate::api::{GenerateContentRequest, GenerateContentResponse};
use crate::core::config::Config;
use crate::core::constants::EMPTY_GENERATION_PLACEHOLDER;
use crate::core::credential::Credential;
use crate::utils::url::construct_api_url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// No API key has been set; nothing was sent.
    MissingCredential,
    /// The request never produced an HTTP response.
    Transport(String),
    /// The API answered with a non-success status.
    HttpStatus { status: u16, description: String },
    /// The body was not JSON or did not have the expected types.
    MalformedResponse(String),
    /// The response was well formed but held no text.
    EmptyGeneration,
}

impl SendError {
    /// Text rendered into the conversation in place of a reply.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::MissingCredential => {
                write!(f, "Please set your API key in the settings.")
            }
            SendError::Transport(detail) => write!(f, "Request error occurred: {detail}"),
            SendError::HttpStatus { description, .. } => {
                write!(f, "HTTP error occurred: {description}")
            }
            SendError::MalformedResponse(detail) => write!(f, "JSON decode error: {detail}"),
            SendError::EmptyGeneration => write!(f, "{EMPTY_GENERATION_PLACEHOLDER}"),
        }
    }
}

impl Error for SendError {}

/// Pull a one-line summary out of an API error body, if it has one.
fn extract_error_summary(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .or_else(|| value.get("error").and_then(|v| v.as_str()))
        .or_else(|| value.get("message").and_then(|v| v.as_str()))?;
    let collapsed = summary.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

fn describe_status(status: StatusCode, body: &str) -> String {
    match extract_error_summary(body) {
        Some(summary) => format!("{status}: {summary}"),
        None => status.to_string(),
    }
}

fn describe_transport(err: reqwest::Error) -> String {
    // The URL carries the API key as a query parameter.
    let err = err.without_url();
    if err.is_timeout() {
        format!("request timed out ({err})")
    } else {
        err.to_string()
    }
}

/// Turn a raw success body into the reply text.
pub fn parse_generation(body: &str) -> Result<String, SendError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|err| SendError::MalformedResponse(err.to_string()))?;
    if let Some(reason) = response.block_reason() {
        debug!(reason, "prompt was blocked");
    }
    if let Some(reason) = response
        .candidates
        .first()
        .and_then(|c| c.finish_reason.as_deref())
    {
        debug!(reason, "generation finished");
    }
    response
        .first_text()
        .map(str::to_owned)
        .ok_or(SendError::EmptyGeneration)
}

#[derive(Clone, Debug)]
pub struct Dispatcher {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            reqwest::Client::new(),
            config.base_url(),
            config.model(),
            config.timeout(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Endpoint without the key; safe to log.
    pub fn endpoint(&self) -> String {
        construct_api_url(
            &self.base_url,
            &format!("models/{}:generateContent", self.model),
        )
    }

    /// Send `user_text` and return the generated reply.
    ///
    /// Blank input is a no-op and yields `Ok(None)`. An empty credential fails
    /// with [`SendError::MissingCredential`] before any connection is opened.
    pub async fn send(
        &self,
        user_text: &str,
        credential: &Credential,
    ) -> Result<Option<String>, SendError> {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Ok(None);
        }
        if credential.is_empty() {
            return Err(SendError::MissingCredential);
        }

        let endpoint = self.endpoint();
        debug!(endpoint = %endpoint, chars = user_text.len(), "sending generateContent request");

        let mut request = self
            .client
            .post(&endpoint)
            .query(&[("key", credential.expose())])
            .header("Content-Type", "application/json")
            .json(&GenerateContentRequest::single_text(user_text));
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|err| SendError::Transport(describe_transport(err)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SendError::Transport(describe_transport(err)))?;
        debug!(status = status.as_u16(), body = %body, "generateContent response");

        if !status.is_success() {
            return Err(SendError::HttpStatus {
                status: status.as_u16(),
                description: describe_status(status, &body),
            });
        }

        parse_generation(&body).map(Some)
    }
}
