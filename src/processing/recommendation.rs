use crate::processing::cache::NormalizedCatalogCache;
use crate::processing::matcher::{MatchRequest, Matcher};
use crate::processing::scoring::SimilarityScorer;
use crate::processing::{RecommendationRequest, ZMQReply};
use crate::repository::CatalogReader;

/// Handle a recommendation request: validate the parameters, load the
/// current catalog snapshot and rank it against the dealer listing.
///
/// Failures are logged and reported to the caller as [`ZMQReply::Error`].
pub fn process_recommendation_message<R, S, C>(
    msg: RecommendationRequest,
    repo: &R,
    matcher: &Matcher<S, C>,
    defaults: MatchRequest,
) -> ZMQReply
where
    R: CatalogReader,
    S: SimilarityScorer,
    C: NormalizedCatalogCache,
{
    log::info!("Received recommendation request: {:?}", msg.query);

    let request = match defaults.with_overrides(msg.limit, msg.threshold) {
        Ok(request) => request,
        Err(e) => {
            log::error!("Invalid recommendation request: {e}");
            return ZMQReply::Error(e.to_string());
        }
    };

    let snapshot = match repo.load_catalog() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::error!("Failed to load catalog: {e}");
            return ZMQReply::Error(format!("catalog unavailable: {e}"));
        }
    };

    if snapshot.is_empty() {
        log::warn!("Catalog version {} is empty", snapshot.version);
    }

    let candidates = matcher.recommend(&msg.query, &snapshot, request);

    log::info!(
        "Finished recommendation request: catalog_version={}, catalog_size={}, limit={}, threshold={}, candidates={}",
        snapshot.version,
        snapshot.len(),
        request.limit(),
        request.threshold(),
        candidates.len()
    );

    ZMQReply::Recommendations(candidates)
}
