use std::path::PathBuf;

pub type Result<T, E = ReplayError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("invalid history file {}: {source}", path.display())]
    Import {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to encode history: {0}")]
    Export(#[from] ron::Error),
}

impl ReplayError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
