use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QcError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parse error in {path}: {message}")]
    XmlParse { path: PathBuf, message: String },

    #[error("XML write error: {0}")]
    XmlWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Result pooling error: {0}")]
    Pooling(String),
}

impl QcError {
    /// Short category name used when reporting errors on the command line.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::FileRead { .. } => "FileRead",
            Self::FileWrite { .. } => "FileWrite",
            Self::XmlParse { .. } => "XmlParse",
            Self::XmlWrite(_) => "XmlWrite",
            Self::Io(_) => "IO",
            Self::JsonSerialize(_) => "JSON",
            Self::Pooling(_) => "Pooling",
        }
    }

    /// Message without the category prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::XmlWrite(msg) | Self::Pooling(msg) => msg.clone(),
            Self::FileRead { path, source } | Self::FileWrite { path, source } => {
                format!("{}: {source}", path.display())
            }
            Self::XmlParse { path, message } => format!("{}: {message}", path.display()),
            Self::Io(e) => e.to_string(),
            Self::JsonSerialize(e) => e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QcError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
