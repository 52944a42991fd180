use serde::{Deserialize, Serialize};

use crate::domain::types::{CatalogVersion, ProductId};

/// One canonical product of the manufacturer catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Catalog product proposed for a dealer listing.
///
/// `matched_name` is the catalog name after vocabulary splitting, the text
/// the score was computed against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: ProductId,
    pub matched_name: String,
    pub score: u8,
}

/// Closed view of the catalog used for a single match operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub version: CatalogVersion,
    pub entries: Vec<CatalogEntry>,
}

impl CatalogSnapshot {
    pub fn new(version: CatalogVersion, entries: Vec<CatalogEntry>) -> Self {
        Self { version, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
