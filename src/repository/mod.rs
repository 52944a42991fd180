use std::path::PathBuf;

use crate::domain::product::CatalogSnapshot;

pub mod catalog;

pub use catalog::JsonCatalogRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("validation error: {0}")]
    ValidationError(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Source of the manufacturer catalog.
pub trait CatalogReader {
    /// Return every named catalog product, tagged with a version that
    /// changes whenever the contents change.
    fn load_catalog(&self) -> RepositoryResult<CatalogSnapshot>;
}
