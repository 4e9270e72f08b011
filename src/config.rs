//! Application configuration loaded from a YAML file.
//!
//! Every field has a default, so a missing config file (or a file that sets
//! only some keys) still produces a usable configuration. CLI flags override
//! whatever the file says.

use crate::topics::Topic;
use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing::{info, instrument};

fn default_service_url() -> String {
    "http://localhost:5001".to_string()
}

/// The article service can take a long time on a cold topic search, so the
/// default request ceiling is generous (25 minutes).
fn default_request_timeout_secs() -> u64 {
    1500
}

fn default_topics() -> Vec<String> {
    vec![
        "technology".to_string(),
        "business".to_string(),
        "science".to_string(),
    ]
}

/// Runtime configuration for the briefing pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Base URL of the article service.
    #[serde(default = "default_service_url")]
    pub service_url: String,
    /// Per-request timeout in seconds for article-service calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Topics used when none are given on the command line.
    #[serde(default = "default_topics")]
    pub default_topics: Vec<String>,
    /// Optional path to a previously downloaded articles CSV, used as a
    /// fallback when the live fetch fails.
    #[serde(default)]
    pub cached_csv: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            service_url: default_service_url(),
            request_timeout_secs: default_request_timeout_secs(),
            default_topics: default_topics(),
            cached_csv: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// A `None` path, or a path that doesn't exist, yields the defaults.
    /// A file that exists but fails to parse is an error; silently ignoring
    /// a broken config would be confusing.
    #[instrument(level = "info", skip_all, fields(path = ?path))]
    pub async fn load(path: Option<&str>) -> Result<AppConfig, Box<dyn Error>> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(AppConfig::default());
        };

        if !std::path::Path::new(path).exists() {
            info!(path, "Config file not found; using defaults");
            return Ok(AppConfig::default());
        }

        let raw = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = serde_yaml::from_str(&raw)?;
        info!(path, service_url = %config.service_url, "Loaded configuration");
        Ok(config)
    }

    /// Default topic selection parsed into [`Topic`] values.
    pub fn default_topic_set(&self) -> Vec<Topic> {
        self.default_topics
            .iter()
            .map(|t| t.parse().expect("Topic::from_str is infallible"))
            .collect()
    }
}
