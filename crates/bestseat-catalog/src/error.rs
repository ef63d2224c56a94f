use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate catalog entry: {0}")]
    Duplicate(String),

    #[error("Empty catalog entry")]
    EmptyEntry,

    #[error("Expected {expected} teams, found {found}")]
    TeamCount { expected: usize, found: usize },
}
