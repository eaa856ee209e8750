use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Driver '{0}' is unknown driver.")]
    UnknownDriver(String),
    #[error("Driver name '{0}' is unknown.")]
    UnknownTemplateDriver(String),
    #[error("Format '{0}' is invalid format.")]
    UnsupportedFormat(String),
    #[error("Output path '{}' is a file, not a directory.", .0.display())]
    OutputIsFile(PathBuf),
    #[error("Config file '{0}' already exists.")]
    ConfigExists(String),
    #[error("Table '{schema}.{name}' is not found.")]
    TableNotFound { schema: String, name: String },
    #[error("Database client is not connected.")]
    NotConnected,
    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(not(target_arch = "wasm32"))]
impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(Box::new(e))
    }
}
