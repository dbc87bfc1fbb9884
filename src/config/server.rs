use std::fs;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::Environment;

pub const CONFIG_FILE_NAME: &str = "folio.toml";
pub const ENVIRONMENT_VAR: &str = "FOLIO_ENV";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Public base URL for external access (e.g., "https://folio.example.com").
    /// Used for sitemap and robots links. If not set, URLs are derived from request headers.
    pub public_base_url: Option<String>,
    pub environment: Environment,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("folio.db")
    }

    #[must_use]
    pub fn admin_password_path(&self) -> PathBuf {
        self.data_dir.join(".admin_password")
    }

    /// Layers the configuration sources. Later layers win:
    /// defaults, the TOML file, command line flags, then `FOLIO_ENV`.
    pub fn resolve(overrides: ConfigOverrides, env_value: Option<&str>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(data_dir) = overrides.data_dir {
            config.data_dir = data_dir;
        }

        let file = match &overrides.config_file {
            Some(path) => Some(FileConfig::load(path)?),
            None => FileConfig::load_optional(&config.data_dir.join(CONFIG_FILE_NAME))?,
        };
        if let Some(file) = file {
            config.apply_file(file);
        }

        if let Some(host) = overrides.host {
            config.host = host;
        }
        if let Some(port) = overrides.port {
            config.port = port;
        }
        if let Some(url) = overrides.public_base_url {
            config.public_base_url = Some(url);
        }
        if let Some(environment) = overrides.environment {
            config.environment = environment;
        }

        if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
            config.environment = Environment::parse(value).ok_or_else(|| {
                Error::Config(format!("{ENVIRONMENT_VAR} has unknown environment '{value}'"))
            })?;
        }

        config.public_base_url = config
            .public_base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(url) = file.public_base_url {
            self.public_base_url = Some(url);
        }
        if let Some(environment) = file.environment {
            self.environment = environment;
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            public_base_url: None,
            environment: Environment::default(),
        }
    }
}

/// Values given on the command line. `None` leaves the lower layer in place.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub public_base_url: Option<String>,
    pub environment: Option<Environment>,
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub public_base_url: Option<String>,
    pub environment: Option<Environment>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Like [`FileConfig::load`], but a missing file is not an error.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        match fs::metadata(path) {
            Ok(_) => Self::load(path).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn overrides_in(dir: &Path) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = ServerConfig::resolve(overrides_in(temp.path()), None).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.db_path(), temp.path().join("folio.db"));
    }

    #[test]
    fn test_layer_precedence() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "host = \"0.0.0.0\"\nport = 9000\npublic_base_url = \"https://a.example/\"\nenvironment = \"production\"\n",
        )
        .unwrap();

        let from_file = ServerConfig::resolve(overrides_in(temp.path()), None).unwrap();
        assert_eq!(from_file.host, "0.0.0.0");
        assert_eq!(from_file.port, 9000);
        assert_eq!(from_file.public_base_url.as_deref(), Some("https://a.example"));
        assert_eq!(from_file.environment, Environment::Production);

        let overrides = ConfigOverrides {
            port: Some(9100),
            environment: Some(Environment::Staging),
            ..overrides_in(temp.path())
        };
        let from_flags = ServerConfig::resolve(overrides.clone(), None).unwrap();
        assert_eq!(from_flags.host, "0.0.0.0");
        assert_eq!(from_flags.port, 9100);
        assert_eq!(from_flags.environment, Environment::Staging);

        let from_env = ServerConfig::resolve(overrides, Some("production")).unwrap();
        assert_eq!(from_env.environment, Environment::Production);
    }

    #[test]
    fn test_explicit_config_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            config_file: Some(temp.path().join("missing.toml")),
            ..overrides_in(temp.path())
        };

        assert!(matches!(
            ServerConfig::resolve(overrides, None),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_unknown_keys_and_env_values_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "colour = \"blue\"\n").unwrap();
        assert!(ServerConfig::resolve(overrides_in(temp.path()), None).is_err());

        let clean = TempDir::new().unwrap();
        assert!(matches!(
            ServerConfig::resolve(overrides_in(clean.path()), Some("qa")),
            Err(Error::Config(_))
        ));
    }
}
