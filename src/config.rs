//! JSON connection config and path resolution.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "tablarian.config";

/// Marks a path argument as absolute instead of working-directory relative.
pub const ABSOLUTE_PATH_MARKER: char = '@';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Postgres,
}

impl Driver {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "postgres" => Some(Self::Postgres),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Self::Postgres => POSTGRES_TEMPLATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Resolved location the config was read from.
    #[serde(skip)]
    pub file_path: PathBuf,
    pub driver: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    /// Output directory of `publish`, resolved like the config path.
    #[serde(default = "default_out")]
    pub out: String,
}

fn default_out() -> String {
    "out".to_string()
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn driver(&self) -> Result<Driver> {
        Driver::from_str(&self.driver).ok_or_else(|| Error::UnknownDriver(self.driver.clone()))
    }
}

/// Resolve and read a config file.
pub fn load_config(path: &str) -> Result<Config> {
    let resolved = resolve_path(path)?;
    let content = fs::read_to_string(&resolved)?;
    let mut config = Config::from_json(&content)?;
    config.file_path = resolved;

    debug!(
        path = %config.file_path.display(),
        driver = %config.driver,
        host = %config.host,
        port = config.port,
        database = %config.database,
        schema = %config.schema,
        "config loaded"
    );
    Ok(config)
}

/// `@/abs/path` is taken as is (marker stripped), anything else is joined to
/// the working directory.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    match path.strip_prefix(ABSOLUTE_PATH_MARKER) {
        Some(abs) => Ok(PathBuf::from(abs)),
        None => Ok(std::env::current_dir()?.join(path)),
    }
}

/// Write a config template for `driver` into `dir`.
pub fn write_template(dir: &Path, driver: &str) -> Result<PathBuf> {
    let driver =
        Driver::from_str(driver).ok_or_else(|| Error::UnknownTemplateDriver(driver.to_string()))?;

    let path = dir.join(DEFAULT_CONFIG_FILE);
    let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(Error::ConfigExists(DEFAULT_CONFIG_FILE.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(driver.template().as_bytes())?;

    debug!(path = %path.display(), driver = driver.name(), "config template written");
    Ok(path)
}

const POSTGRES_TEMPLATE: &str = r#"{
  "driver": "postgres",
  "host": "localhost",
  "port": 5432,
  "user": "postgres",
  "password": "your-password",
  "database": "postgres",
  "schema": "public",
  "options": {
    "sslmode": "disable"
  },
  "out": "out"
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = Config::from_json(POSTGRES_TEMPLATE).unwrap();
        assert_eq!(config.driver, "postgres");
        assert_eq!(config.port, 5432);
        assert_eq!(config.schema, "public");
        assert_eq!(config.options.get("sslmode").map(String::as_str), Some("disable"));
        assert_eq!(config.out, "out");
        assert_eq!(config.driver().unwrap(), Driver::Postgres);
    }

    #[test]
    fn test_optional_fields() {
        let config = Config::from_json(r#"{"driver": "postgres", "schema": "public"}"#).unwrap();
        assert!(config.options.is_empty());
        assert_eq!(config.out, "out");
    }

    #[test]
    fn test_invalid_json() {
        let err = Config::from_json(r#"{"driver": "postgres""#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_unknown_driver() {
        let config = Config::from_json(r#"{"driver": "oracle"}"#).unwrap();
        assert_eq!(config.driver().unwrap_err().to_string(), "Driver 'oracle' is unknown driver.");
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            resolve_path("@/etc/tablarian.config").unwrap(),
            PathBuf::from("/etc/tablarian.config")
        );
        let relative = resolve_path("conf/tablarian.config").unwrap();
        assert!(relative.is_absolute());
        assert!(relative.ends_with("conf/tablarian.config"));
    }

    #[test]
    fn test_load_config_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.config");
        fs::write(&path, POSTGRES_TEMPLATE).unwrap();

        let config = load_config(&format!("@{}", path.display())).unwrap();
        assert_eq!(config.file_path, path);
        assert_eq!(config.database, "postgres");
    }

    #[test]
    fn test_load_missing_config() {
        let err = load_config("@/nonexistent/tablarian.config").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_write_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "postgres").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), POSTGRES_TEMPLATE);

        let err = write_template(dir.path(), "postgres").unwrap_err();
        assert_eq!(err.to_string(), "Config file 'tablarian.config' already exists.");
    }

    #[test]
    fn test_write_template_unknown_driver() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_template(dir.path(), "foobar").unwrap_err();
        assert_eq!(err.to_string(), "Driver name 'foobar' is unknown.");
        assert!(!dir.path().join(DEFAULT_CONFIG_FILE).exists());
    }
}
