use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] crate::io::Error),

    #[error(transparent)]
    Regroup(#[from] crate::regroup::Error),

    #[error(transparent)]
    Canon(#[from] crate::canon::Error),

    #[error("invalid pipeline configuration{}: {source}", path.as_ref().map(|p| format!(" in '{}'", p.display())).unwrap_or_default())]
    Config {
        path: Option<PathBuf>,
        source: toml::de::Error,
    },

    #[error("no input SD file configured")]
    MissingInput,
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::Config { path: None, source }
    }
}
