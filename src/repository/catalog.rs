use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::product::{CatalogEntry, CatalogSnapshot};
use crate::domain::types::{CatalogVersion, ProductId};
use crate::repository::{CatalogReader, RepositoryError, RepositoryResult};

/// Catalog record as exported from the product table; names may be missing.
#[derive(Deserialize)]
struct CatalogRecord {
    id: i64,
    #[serde(default)]
    name: Option<String>,
}

/// Catalog stored as a JSON array of `{"id": .., "name": ..}` objects.
///
/// The file is read on every load; its content hash is the snapshot version.
#[derive(Clone, Debug)]
pub struct JsonCatalogRepository {
    path: PathBuf,
}

impl JsonCatalogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn content_version(bytes: &[u8]) -> CatalogVersion {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    CatalogVersion::new(hasher.finish())
}

fn parse_catalog(bytes: &[u8]) -> RepositoryResult<Vec<CatalogEntry>> {
    let records: Vec<CatalogRecord> = serde_json::from_slice(bytes)?;

    let mut skipped = 0;
    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let Some(name) = record.name else {
            skipped += 1;
            continue;
        };
        let id = ProductId::new(record.id)
            .map_err(|err| RepositoryError::ValidationError(err.to_string()))?;
        entries.push(CatalogEntry::new(id, name));
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} catalog products without a name");
    }

    Ok(entries)
}

impl CatalogReader for JsonCatalogRepository {
    fn load_catalog(&self) -> RepositoryResult<CatalogSnapshot> {
        let bytes = std::fs::read(&self.path).map_err(|source| RepositoryError::Io {
            path: self.path.clone(),
            source,
        })?;

        let entries = parse_catalog(&bytes)?;
        Ok(CatalogSnapshot::new(content_version(&bytes), entries))
    }
}
