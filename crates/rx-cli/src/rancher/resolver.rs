//! Resolution of a container query to an open exec stream

use std::io;

use async_trait::async_trait;

use rx_core::error::ResolveError;
use rx_core::traits::StreamResolver;
use rx_core::TerminalSize;

use super::client::{ExecRequest, RancherClient};
use super::select::select_container;
use super::stream::{connect_stream, WsStream};
use crate::output::{print_info, print_success};

/// Resolves containers through the Rancher API
pub struct RancherResolver {
    client: RancherClient,
    term: String,
    size: Option<TerminalSize>,
}

impl RancherResolver {
    /// `size` is mirrored remotely; pass `None` for non-interactive input
    pub fn new(client: RancherClient, term: impl Into<String>, size: Option<TerminalSize>) -> Self {
        Self {
            client,
            term: term.into(),
            size,
        }
    }
}

#[async_trait]
impl StreamResolver for RancherResolver {
    type Stream = WsStream;

    async fn resolve(&self, query: &str, command: &str) -> Result<WsStream, ResolveError> {
        print_info(&format!("Searching for container {}", query));
        let candidates = self.client.search_containers(query).await?;

        let owned_query = query.to_string();
        let container = tokio::task::spawn_blocking(move || {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stderr();
            select_container(&owned_query, candidates, &mut input, &mut out)
        })
        .await
        .map_err(|e| ResolveError::Selection(e.to_string()))??;
        print_success(&format!("Target Container: {}", container.describe()));
        tracing::info!(id = %container.id, name = %container.name, "Container resolved");

        print_info("Getting access token");
        let request = ExecRequest {
            command: command.to_string(),
            term: self.term.clone(),
            size: self.size,
        };
        let grant = self.client.request_exec(&container, &request).await?;

        print_info("Connecting to container ...");
        connect_stream(&grant.stream_url(), self.client.base_url()).await
    }
}
