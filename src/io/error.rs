use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create '{}': {source}", path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse SD data: {details} (at line ~{line})")]
    Parse { line: usize, details: String },

    #[error("molfile version {version} is not supported (at line ~{line})")]
    UnsupportedVersion { line: usize, version: String },
}

impl Error {
    pub fn parse(line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            line,
            details: details.into(),
        }
    }

    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Create {
            path: path.into(),
            source,
        }
    }
}
