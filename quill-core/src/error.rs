use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop an `add-topic` or `add-page` run.
///
/// All variants are fatal. Writes issued before the failure stay on disk.
#[derive(Error, Debug)]
pub enum Error {
    /// A required answer was empty after defaulting.
    #[error("Please insert a non-empty {0}")]
    Validation(String),

    /// A referenced topic or a contents marker does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The name or file is already taken.
    #[error("{0}")]
    Conflict(String),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(field: impl Into<String>) -> Self {
        Error::Validation(field.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Error::Conflict(msg.into())
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
