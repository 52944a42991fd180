pub mod domain;
pub mod models;
pub mod processing;
pub mod repository;

/// Number of candidates returned when a request does not ask for a count.
pub const DEFAULT_RESULT_LIMIT: i64 = 10;

/// Minimal token-sort score a catalog product needs to be recommended.
pub const DEFAULT_SIMILARITY_THRESHOLD: i64 = 50;
