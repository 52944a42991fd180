//! Normalized catalog names, reusable across requests.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::product::{CatalogEntry, CatalogSnapshot};
use crate::domain::types::{CatalogVersion, ProductId};
use crate::processing::normalize::Vocabulary;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedEntry {
    pub id: ProductId,
    pub name: String,
}

/// Catalog entries with names already split by the catalog vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedCatalog {
    version: Option<CatalogVersion>,
    entries: Vec<NormalizedEntry>,
}

impl NormalizedCatalog {
    /// Normalize a versioned snapshot.
    pub fn build(snapshot: &CatalogSnapshot, vocabulary: &Vocabulary) -> Self {
        let mut catalog = Self::from_entries(&snapshot.entries, vocabulary);
        catalog.version = Some(snapshot.version);
        catalog
    }

    /// Normalize entries that carry no version; the result is never cached.
    pub fn from_entries(entries: &[CatalogEntry], vocabulary: &Vocabulary) -> Self {
        Self {
            version: None,
            entries: entries
                .iter()
                .map(|entry| NormalizedEntry {
                    id: entry.id,
                    name: vocabulary.split(&entry.name),
                })
                .collect(),
        }
    }

    pub fn version(&self) -> Option<CatalogVersion> {
        self.version
    }

    pub fn entries(&self) -> &[NormalizedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Storage for the normalized form of the current catalog snapshot.
///
/// Implementations must return a catalog built from `snapshot` whenever the
/// stored one has a different version.
pub trait NormalizedCatalogCache: Send + Sync {
    fn get_or_build(
        &self,
        snapshot: &CatalogSnapshot,
        vocabulary: &Vocabulary,
    ) -> Arc<NormalizedCatalog>;

    fn invalidate(&self);
}

/// Keeps the normalized catalog of the most recent snapshot version.
#[derive(Debug, Default)]
pub struct VersionedCatalogCache {
    slot: RwLock<Option<Arc<NormalizedCatalog>>>,
}

impl VersionedCatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Version currently held, if any.
    pub fn cached_version(&self) -> Option<CatalogVersion> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|catalog| catalog.version())
    }
}

impl NormalizedCatalogCache for VersionedCatalogCache {
    fn get_or_build(
        &self,
        snapshot: &CatalogSnapshot,
        vocabulary: &Vocabulary,
    ) -> Arc<NormalizedCatalog> {
        if let Some(catalog) = self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|catalog| catalog.version() == Some(snapshot.version))
        {
            return Arc::clone(catalog);
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have built the same version meanwhile.
        if let Some(catalog) = slot
            .as_ref()
            .filter(|catalog| catalog.version() == Some(snapshot.version))
        {
            return Arc::clone(catalog);
        }

        log::debug!(
            "Normalizing catalog version {} ({} entries)",
            snapshot.version,
            snapshot.len()
        );
        let catalog = Arc::new(NormalizedCatalog::build(snapshot, vocabulary));
        *slot = Some(Arc::clone(&catalog));
        catalog
    }

    fn invalidate(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Normalizes the catalog on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCache;

impl NormalizedCatalogCache for NoCache {
    fn get_or_build(
        &self,
        snapshot: &CatalogSnapshot,
        vocabulary: &Vocabulary,
    ) -> Arc<NormalizedCatalog> {
        Arc::new(NormalizedCatalog::build(snapshot, vocabulary))
    }

    fn invalidate(&self) {}
}
