//! Configuration management.

use serde::Deserialize;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Startup seeding configuration
    #[serde(default)]
    pub seed: SeedConfig,

    /// OData presentation configuration
    #[serde(default)]
    pub odata: ODataConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Number of employees fabricated at startup
    #[serde(default = "default_employee_count")]
    pub employee_count: usize,

    /// Base offset of the sequential employee-id scheme
    #[serde(default = "default_id_base_offset")]
    pub id_base_offset: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            employee_count: default_employee_count(),
            id_base_offset: default_id_base_offset(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ODataConfig {
    /// Domain prefixed to `__metadata.id` entity URLs
    #[serde(default = "default_metadata_domain")]
    pub metadata_domain: String,
}

impl Default for ODataConfig {
    fn default() -> Self {
        Self {
            metadata_domain: default_metadata_domain(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
        }
    }
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_employee_count() -> usize { 50 }
fn default_id_base_offset() -> u32 { 10_000 }
fn default_metadata_domain() -> String { "http://localhost:8080".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }

impl Config {
    /// Load configuration from the environment (`SAPMOCK__` prefix).
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("SAPMOCK").separator("__"))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        Ok(cfg)
    }

    /// Load from a specific file path, with environment overrides.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("SAPMOCK").separator("__"))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        Ok(cfg)
    }
}
