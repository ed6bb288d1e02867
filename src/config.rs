use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Conventional flat variables that predate the prefixed layout, mapped onto
/// their configuration keys.
const FLAT_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("AZ_SEARCH_ENDPOINT", "service.endpoint"),
    ("AZ_SEARCH_KEY", "service.api_key"),
    ("AZ_BLOB_CONNECTION_STRING", "secrets.blob_connection_string"),
    ("COG_SERVICE_KEY", "secrets.cognitive_service_key"),
];

/// Main application configuration
///
/// Built once at process start and handed to the gateway, the loader and the
/// web state by reference. Nothing reads the process environment after this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Web server configuration
    pub server: ServerConfig,

    /// Remote search service configuration
    pub service: ServiceConfig,

    /// Secrets injected into provisioning documents
    #[serde(default)]
    pub secrets: SecretsConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/local.toml".to_string());

        Self::load_from(&config_path, std::env::vars().collect())
    }

    /// Load configuration from an explicit file path and variable map
    pub fn load_from(
        config_path: &str,
        vars: HashMap<String, String>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(config_path).required(false))
            // Override with environment variables (prefix: SEARCH_PORTAL__)
            .add_source(
                config::Environment::with_prefix("SEARCH_PORTAL")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            );

        for (var, key) in FLAT_ENV_OVERRIDES {
            builder = builder.set_override_option(*key, vars.get(*var).cloned())?;
        }

        builder.build()?.try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under /static
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Search service host name or base URL
    #[serde(default)]
    pub endpoint: String,

    /// API key sent in the `api-key` header
    #[serde(default)]
    pub api_key: String,

    /// Index queried by the web front-end
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Pinned REST API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Client-side request timeout (seconds). Unset means wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ServiceConfig {
    /// Base URL for requests. A bare host name is reached over HTTPS.
    pub fn base_url(&self) -> String {
        let endpoint = self.endpoint.trim().trim_end_matches('/');
        if endpoint.starts_with("https://") || endpoint.starts_with("http://") {
            endpoint.to_string()
        } else {
            format!("https://{}", endpoint)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretsConfig {
    /// Blob storage connection string for data sources and knowledge stores
    pub blob_connection_string: Option<String>,

    /// Cognitive service key attached to skillsets
    pub cognitive_service_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_index_name() -> String {
    "margies-index-py".to_string()
}

fn default_api_version() -> String {
    crate::search::API_VERSION.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
