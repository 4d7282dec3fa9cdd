//! Core domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSize {
    /// Number of rows
    pub rows: u16,
    /// Number of columns
    pub cols: u16,
}

impl TerminalSize {
    /// Create a new terminal size
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

/// A running container as listed by the Rancher v1 API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Container resource ID
    pub id: String,
    /// Container name
    #[serde(default)]
    pub name: String,
    /// Project (environment) the container belongs to
    #[serde(default)]
    pub account_id: String,
    /// Primary IP address, when reported at the top level
    #[serde(default)]
    pub primary_ip_address: Option<String>,
    /// Extended resource data, present on managed containers
    #[serde(default)]
    pub data: Option<ContainerData>,
}

/// Extended container data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerData {
    #[serde(default)]
    pub fields: ContainerFields,
}

/// Network fields nested under `data.fields`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerFields {
    #[serde(default)]
    pub primary_ip_address: Option<String>,
    #[serde(default)]
    pub docker_host_ip: Option<String>,
}

impl Container {
    /// Primary IP address, preferring the nested field set when present
    pub fn primary_ip(&self) -> Option<&str> {
        match &self.data {
            Some(data) => data.fields.primary_ip_address.as_deref(),
            None => self.primary_ip_address.as_deref(),
        }
    }

    /// IP address of the Docker host running the container
    pub fn host_ip(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.fields.docker_host_ip.as_deref())
    }

    /// One-line human summary used when announcing the target
    pub fn describe(&self) -> String {
        let mut summary = format!(
            "{}, ID {} in project {}, Addr {}",
            self.name,
            self.id,
            self.account_id,
            self.primary_ip().unwrap_or("-")
        );
        if let Some(host) = self.host_ip() {
            summary.push_str(&format!(" on Host {}", host));
        }
        summary
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
