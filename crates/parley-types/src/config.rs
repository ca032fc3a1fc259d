//! Global configuration types for Parley.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! bind address, collaborator endpoints, and the upload directory.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Parley server.
///
/// Loaded from `{data_dir}/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Host the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server binds to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the bot-response collaborator.
    #[serde(default = "default_bot_endpoint")]
    pub bot_endpoint: String,

    /// Base URL of the PDF ingest/evict collaborator.
    #[serde(default = "default_pdf_endpoint")]
    pub pdf_endpoint: String,

    /// Upload directory override. Defaults to `{data_dir}/uploads` when unset.
    #[serde(default)]
    pub upload_dir: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_bot_endpoint() -> String {
    "http://127.0.0.1:8600".to_string()
}

fn default_pdf_endpoint() -> String {
    "http://127.0.0.1:8601".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bot_endpoint: default_bot_endpoint(),
            pdf_endpoint: default_pdf_endpoint(),
            upload_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.upload_dir.is_none());
    }

    #[test]
    fn deserialize_empty_toml_uses_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bot_endpoint, "http://127.0.0.1:8600");
    }

    #[test]
    fn deserialize_partial_toml_overrides() {
        let config: GlobalConfig = toml::from_str(
            r#"
port = 9000
upload_dir = "/srv/parley/uploads"
"#,
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.upload_dir.as_deref(), Some("/srv/parley/uploads"));
    }
}
