use serde::{Deserialize, Serialize};

use super::controller::ControllerConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

/// Main configuration structure for nexns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, port, transports)
    #[serde(default)]
    pub server: ServerConfig,

    /// Controller connection (dataset dumps and notifications)
    #[serde(default)]
    pub controller: ControllerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. nexns.toml in current directory
    /// 3. /etc/nexns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("nexns.toml").exists() {
            Self::from_file("nexns.toml")?
        } else if std::path::Path::new("/etc/nexns/config.toml").exists() {
            Self::from_file("/etc/nexns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(url) = overrides.controller_url {
            self.controller.url = url;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Invalid("DNS port cannot be 0".to_string()));
        }

        if self.server.udp_payload_limit < 512 {
            return Err(ConfigError::Invalid(
                "udp_payload_limit cannot be below 512 bytes".to_string(),
            ));
        }

        if self.controller.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "No controller URL configured".to_string(),
            ));
        }

        if self.controller.reconnect_backoff_secs == 0 {
            return Err(ConfigError::Invalid(
                "reconnect_backoff_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub controller_url: Option<String>,
    pub log_level: Option<String>,
}
