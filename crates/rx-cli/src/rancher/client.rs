//! HTTP client for the Rancher v1 API
//!
//! Only the two calls needed to reach a container's shell are implemented:
//! the container search and the `execute` action that yields a one-time
//! stream URL.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use rx_core::config::ExecConfig;
use rx_core::error::ResolveError;
use rx_core::{Container, TerminalSize};

/// Rancher API client authenticated with an access/secret key pair
pub struct RancherClient {
    http: reqwest::Client,
    base_url: String,
    access_key: String,
    secret_key: String,
}

/// Parameters of an `execute` action
#[derive(Debug, Clone)]
pub struct ExecRequest {
    /// Command line run by the remote shell
    pub command: String,
    /// `TERM` exported before running the command
    pub term: String,
    /// Local window size to mirror remotely, if interactive
    pub size: Option<TerminalSize>,
}

/// One-time grant to attach to an exec'd process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecGrant {
    pub url: String,
    pub token: String,
}

#[derive(Deserialize)]
struct Collection<T> {
    data: Vec<T>,
}

#[derive(Deserialize)]
struct GrantDocument {
    url: Option<String>,
    token: Option<String>,
}

impl RancherClient {
    /// Create a client from the session configuration
    pub fn new(config: &ExecConfig) -> Result<Self, ResolveError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ResolveError::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: normalize_base_url(&config.url),
            access_key: config.access_key.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    /// Normalised API base URL (always ending in the `/v1` path)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List running containers whose name matches `query`
    pub async fn search_containers(&self, query: &str) -> Result<Vec<Container>, ResolveError> {
        let url = format!("{}/containers/", self.base_url);
        tracing::debug!(url = %url, query = %query, "Searching containers");

        let request = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .query(&[
                ("name_like", name_filter(query).as_str()),
                ("state", "running"),
                ("kind", "container"),
            ]);

        let collection: Collection<Container> = self.send(request).await?;
        tracing::debug!(matches = collection.data.len(), "Container search complete");
        Ok(collection.data)
    }

    /// Request an execution grant for a command inside `container`
    pub async fn request_exec(
        &self,
        container: &Container,
        request: &ExecRequest,
    ) -> Result<ExecGrant, ResolveError> {
        let url = format!("{}/containers/{}/", self.base_url, container.id);
        tracing::debug!(url = %url, script = %request.script(), "Requesting exec grant");

        let builder = self
            .http
            .post(&url)
            .query(&[("action", "execute")])
            .json(&request.body());

        let document: GrantDocument = self.send(builder).await?;
        match (document.url, document.token) {
            (Some(url), Some(token)) if !url.is_empty() && !token.is_empty() => {
                Ok(ExecGrant { url, token })
            }
            _ => Err(ResolveError::Grant(
                "response is missing url or token".to_string(),
            )),
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ResolveError> {
        let response = request
            .header(ACCEPT, "application/json")
            .basic_auth(&self.access_key, Some(&self.secret_key))
            .send()
            .await
            .map_err(|e| ResolveError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ResolveError::Http(e.to_string()))?;
        tracing::trace!(status = %status, body_len = body.len(), "API response");

        parse_document(&body)
    }
}

/// Parse an API response body, surfacing Rancher error documents
pub fn parse_document<T: DeserializeOwned>(body: &str) -> Result<T, ResolveError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ResolveError::Http(format!("invalid JSON: {}", e)))?;

    if value.get("type").and_then(Value::as_str) == Some("error") {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| value.get("code").and_then(Value::as_str))
            .unwrap_or("unknown API error");
        return Err(ResolveError::Api(message.to_string()));
    }

    serde_json::from_value(value)
        .map_err(|e| ResolveError::Http(format!("unexpected response: {}", e)))
}

/// Normalise a configured API URL to its `/v1` base
///
/// A single trailing slash is dropped and `/v1` appended unless the URL
/// already addresses the v1 API (`.../v1` or `.../v1/projects/<id>`).
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    if trimmed.contains("/v1/") || trimmed.ends_with("/v1") {
        trimmed.to_string()
    } else {
        format!("{}/v1", trimmed)
    }
}

/// Translate shell-style `*` wildcards into the API's `%`
pub fn name_filter(query: &str) -> String {
    query.replace('*', "%")
}

impl ExecRequest {
    /// Shell script run via `/bin/sh -c`; its last output line is `$?`
    pub fn script(&self) -> String {
        let stty = match self.size {
            Some(size) => format!("stty cols {} rows {}; ", size.cols, size.rows),
            None => String::new(),
        };
        format!(
            "TERM={}; export TERM; {}{}; echo $?",
            self.term, stty, self.command
        )
    }

    /// JSON body of the `execute` action
    pub fn body(&self) -> Value {
        json!({
            "attachStdin": true,
            "attachStdout": true,
            "tty": true,
            "command": ["/bin/sh", "-c", self.script()],
        })
    }
}

impl ExecGrant {
    /// Stream URL carrying the one-time token
    pub fn stream_url(&self) -> String {
        format!("{}?token={}", self.url, self.token)
    }
}
