use serde::{Deserialize, Serialize};

use crate::domain::product::Candidate;

pub mod cache;
pub mod matcher;
pub mod normalize;
pub mod recommendation;
pub mod scoring;

/// Requests accepted by the worker socket.
#[derive(Deserialize, Serialize, Debug)]
pub enum ZMQMessage {
    Recommend(RecommendationRequest),
}

/// Dealer listing to find catalog products for.
///
/// Absent `limit` and `threshold` fall back to the configured defaults.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub query: String,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub threshold: Option<i64>,
}

/// Reply sent back for every request.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum ZMQReply {
    Recommendations(Vec<Candidate>),
    Error(String),
}
