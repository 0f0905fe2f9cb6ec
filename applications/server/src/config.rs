/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Listen address; `:8090` binds every interface
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Deadline for a whole request, storage work included
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Database path, `sqlite:` URL or `:memory:`
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Without an explicit `path`, `config.toml` in the working directory is
    /// used when present. Environment variables prefixed with `SCIPLAYER_`
    /// override file values, with `__` separating nested keys
    /// (e.g. `SCIPLAYER_SERVER__ADDR`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SCIPLAYER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Apply command-line overrides on top of file and environment values
    #[must_use]
    pub fn with_overrides(mut self, db_path: Option<String>, addr: Option<String>) -> Self {
        if let Some(db_path) = db_path {
            self.storage.db_path = db_path;
        }
        if let Some(addr) = addr {
            self.server.addr = addr;
        }
        self
    }

    /// Resolve the listen address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = self.server.addr.trim();
        let addr = if addr.starts_with(':') {
            format!("0.0.0.0{addr}")
        } else {
            addr.to_string()
        };

        addr.parse().map_err(|e| {
            ServerError::Config(format!("Invalid listen address {:?}: {}", self.server.addr, e))
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.db_path.trim().is_empty() {
            return Err(ServerError::Config(
                "Database path is required (set SCIPLAYER_DB_PATH)".to_string(),
            ));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ServerError::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        self.socket_addr()?;

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        addr: default_addr(),
        request_timeout_secs: default_request_timeout_secs(),
    }
}

fn default_addr() -> String {
    ":8090".to_string()
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        db_path: default_db_path(),
    }
}

fn default_db_path() -> String {
    "data/sciplayer.db".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();

        assert_eq!(config.storage.db_path, "data/sciplayer.db");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.socket_addr().unwrap(),
            "0.0.0.0:8090".parse::<SocketAddr>().unwrap()
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_replace_values() {
        let config = ServerConfig::default().with_overrides(
            Some("/tmp/other.db".to_string()),
            Some("127.0.0.1:9000".to_string()),
        );

        assert_eq!(config.storage.db_path, "/tmp/other.db");
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:9000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_missing_overrides_keep_values() {
        let config = ServerConfig::default().with_overrides(None, None);

        assert_eq!(config.storage.db_path, "data/sciplayer.db");
        assert_eq!(config.server.addr, ":8090");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ServerConfig::default();
        config.storage.db_path = "  ".to_string();
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));

        let mut config = ServerConfig::default();
        config.server.addr = "not-an-address".to_string();
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));

        let mut config = ServerConfig::default();
        config.server.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\naddr = \"127.0.0.1:7000\"\n\n[storage]\ndb_path = \"/var/lib/sciplayer.db\""
        )
        .unwrap();

        let config = ServerConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.server.addr, "127.0.0.1:7000");
        assert_eq!(config.server.request_timeout_secs, 5);
        assert_eq!(config.storage.db_path, "/var/lib/sciplayer.db");
    }
}
