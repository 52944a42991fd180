//! Helpers for integration tests.

use std::path::{Path, PathBuf};

use dealer_matcher::models::config::ServerConfig;
use dealer_matcher::processing::normalize::Vocabularies;
use tempfile::TempDir;

/// Temporary catalog file used in integration tests.
pub struct TestCatalog {
    _dir: TempDir,
    path: PathBuf,
}

impl TestCatalog {
    pub fn new(entries: &[(i64, Option<&str>)]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join("catalog.json");
        let catalog = TestCatalog { _dir: dir, path };
        catalog.write(entries);
        catalog
    }

    /// Replace the catalog contents.
    pub fn write(&self, entries: &[(i64, Option<&str>)]) {
        let records = entries
            .iter()
            .map(|(id, name)| serde_json::json!({ "id": id, "name": name }))
            .collect::<Vec<_>>();
        let json = serde_json::to_vec(&records).expect("Failed to serialize catalog.");
        std::fs::write(&self.path, json).expect("Failed to write catalog file.");
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Vocabularies shipped in `config/default.yaml`.
pub fn shipped_vocabularies() -> Vocabularies {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/default.yaml");
    ServerConfig::load_from(&path)
        .expect("Failed to load default config.")
        .vocabulary
}
