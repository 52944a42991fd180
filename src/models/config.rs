//! Configuration model loaded from external sources.
//!
//! Sources, later ones winning: `config/default.yaml`, the file named by the
//! `APP_CONFIG` environment variable, then `APP__*` environment variables
//! (`APP__MATCHER__SIMILARITY_THRESHOLD=70`).

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::processing::matcher::{MatchError, MatchRequest};
use crate::processing::normalize::Vocabularies;
use crate::processing::scoring::TokenSortRatio;
use crate::{DEFAULT_RESULT_LIMIT, DEFAULT_SIMILARITY_THRESHOLD};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.yaml";

#[derive(Clone, Debug, Deserialize)]
/// Settings of the recommendation worker.
pub struct ServerConfig {
    pub zmq_address: String,
    pub catalog_path: PathBuf,
    #[serde(default)]
    pub matcher: MatcherDefaults,
    #[serde(default)]
    pub scorer: TokenSortRatio,
    pub vocabulary: Vocabularies,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// Parameters applied when a request leaves them out.
pub struct MatcherDefaults {
    pub result_limit: i64,
    pub similarity_threshold: i64,
}

impl Default for MatcherDefaults {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl MatcherDefaults {
    pub fn to_request(&self) -> Result<MatchRequest, MatchError> {
        MatchRequest::new(self.result_limit, self.similarity_threshold)
    }
}

impl ServerConfig {
    /// Load from [`DEFAULT_CONFIG_PATH`] and the usual overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("zmq_address", "tcp://127.0.0.1:5556")?
            .add_source(File::from(path));

        if let Ok(extra) = std::env::var("APP_CONFIG") {
            builder = builder.add_source(File::with_name(&extra));
        }

        builder
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
