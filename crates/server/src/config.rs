//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GASTROBOARD_HOST` - Bind address (default: 0.0.0.0, so TVs on the
//!   venue network can reach the display)
//! - `GASTROBOARD_PORT` - Listen port (default: 3000)
//! - `GASTROBOARD_DATA_PATH` - Configuration document location
//!   (default: gastroboard_data_v1.json in the working directory)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Default document file, named after the storage key the install migrates
/// from.
pub const DEFAULT_DATA_PATH: &str = "gastroboard_data_v1.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server process configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path of the persisted configuration document
    pub data_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("GASTROBOARD_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GASTROBOARD_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("GASTROBOARD_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GASTROBOARD_PORT".to_string(), e.to_string())
            })?;
        let data_path = PathBuf::from(get_env_or_default("GASTROBOARD_DATA_PATH", DEFAULT_DATA_PATH));

        Ok(Self {
            host,
            port,
            data_path,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 4000,
            data_path: PathBuf::from("test.json"),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 4000);
    }

    #[test]
    fn test_default_data_path_matches_legacy_storage_key() {
        assert_eq!(DEFAULT_DATA_PATH, "gastroboard_data_v1.json");
    }
}
