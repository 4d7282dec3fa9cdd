//! Exec session configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for a remote exec session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecConfig {
    /// Rancher API URL, `https://host/v1` or `https://host/v1/projects/<id>`
    pub url: String,

    /// API access key
    pub access_key: String,

    /// API secret key
    pub secret_key: String,

    /// Command line run inside the container
    pub command: String,

    /// `TERM` exported in the remote shell
    pub term: String,

    /// Timeout for API requests, in seconds
    pub request_timeout_secs: u64,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            command: "/bin/sh".to_string(),
            term: "xterm-256color".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Values supplied by flags or environment, applied over the file config
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub command: Option<String>,
}

impl ExecConfig {
    /// Apply overrides; empty override values are ignored
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        fn apply(slot: &mut String, value: Option<String>) {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }

        apply(&mut self.url, overrides.url);
        apply(&mut self.access_key, overrides.access_key);
        apply(&mut self.secret_key, overrides.secret_key);
        apply(&mut self.command, overrides.command);
        self
    }

    /// Check that every required setting is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("url", &self.url),
            ("access_key", &self.access_key),
            ("secret_key", &self.secret_key),
            ("command", &self.command),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(name.to_string()));
            }
        }
        if self.term.trim().is_empty() {
            return Err(ConfigError::Invalid("term must not be empty".to_string()));
        }
        Ok(())
    }

    /// API request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ExecConfig {
        ExecConfig {
            url: "https://rancher.example.com/v1".to_string(),
            access_key: "ak".to_string(),
            secret_key: "sk".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = ExecConfig::default();
        assert_eq!(config.command, "/bin/sh");
        assert_eq!(config.term, "xterm-256color");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_merge_overrides_win() {
        let config = complete().merge(ConfigOverrides {
            url: Some("https://other/v1".to_string()),
            command: Some("bash -l".to_string()),
            ..Default::default()
        });
        assert_eq!(config.url, "https://other/v1");
        assert_eq!(config.command, "bash -l");
        assert_eq!(config.access_key, "ak");
    }

    #[test]
    fn test_merge_ignores_empty_values() {
        let config = complete().merge(ConfigOverrides {
            access_key: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(config.access_key, "ak");
    }

    #[test]
    fn test_validate_complete() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_field() {
        let config = ExecConfig {
            secret_key: String::new(),
            ..complete()
        };
        match config.validate() {
            Err(ConfigError::MissingField(field)) => assert_eq!(field, "secret_key"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_blank_command() {
        let config = ExecConfig {
            command: "   ".to_string(),
            ..complete()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField(_))
        ));
    }
}
