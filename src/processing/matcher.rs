//! Ranking of catalog products against a dealer listing.

use crate::domain::product::{Candidate, CatalogEntry, CatalogSnapshot};
use crate::processing::cache::{NormalizedCatalog, NormalizedCatalogCache, VersionedCatalogCache};
use crate::processing::normalize::Vocabularies;
use crate::processing::scoring::SimilarityScorer;
use crate::{DEFAULT_RESULT_LIMIT, DEFAULT_SIMILARITY_THRESHOLD};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("result limit must not be negative, got {0}")]
    InvalidLimit(i64),
    #[error("similarity threshold must be within 0..=100, got {0}")]
    InvalidThreshold(i64),
}

/// Validated per-call matching parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchRequest {
    limit: usize,
    threshold: u8,
}

impl MatchRequest {
    pub fn new(limit: i64, threshold: i64) -> Result<Self, MatchError> {
        let limit = usize::try_from(limit).map_err(|_| MatchError::InvalidLimit(limit))?;
        let threshold = u8::try_from(threshold)
            .ok()
            .filter(|value| *value <= 100)
            .ok_or(MatchError::InvalidThreshold(threshold))?;
        Ok(Self { limit, threshold })
    }

    /// Replace the parameters that are present, validating them.
    pub fn with_overrides(
        self,
        limit: Option<i64>,
        threshold: Option<i64>,
    ) -> Result<Self, MatchError> {
        let limit = match limit {
            Some(value) => value,
            None => i64::try_from(self.limit).unwrap_or(i64::MAX),
        };
        Self::new(limit, threshold.unwrap_or(i64::from(self.threshold)))
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl Default for MatchRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RESULT_LIMIT as usize,
            threshold: DEFAULT_SIMILARITY_THRESHOLD as u8,
        }
    }
}

/// Proposes catalog products for free-text dealer listings.
///
/// The matcher holds no per-request state and may be shared between threads.
pub struct Matcher<S, C = VersionedCatalogCache> {
    vocabularies: Vocabularies,
    scorer: S,
    cache: C,
}

impl<S: SimilarityScorer> Matcher<S, VersionedCatalogCache> {
    pub fn new(vocabularies: Vocabularies, scorer: S) -> Self {
        Self::with_cache(vocabularies, scorer, VersionedCatalogCache::new())
    }
}

impl<S, C> Matcher<S, C>
where
    S: SimilarityScorer,
    C: NormalizedCatalogCache,
{
    pub fn with_cache(vocabularies: Vocabularies, scorer: S, cache: C) -> Self {
        Self {
            vocabularies,
            scorer,
            cache,
        }
    }

    pub fn vocabularies(&self) -> &Vocabularies {
        &self.vocabularies
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Split the dealer vocabulary out of a listing name.
    pub fn normalize_query(&self, query: &str) -> String {
        self.vocabularies.dealer.split(query)
    }

    /// Recommend products from a versioned snapshot, reusing the cached
    /// normalized names while the snapshot version is unchanged.
    pub fn recommend(
        &self,
        query: &str,
        snapshot: &CatalogSnapshot,
        request: MatchRequest,
    ) -> Vec<Candidate> {
        if request.limit() == 0 || snapshot.is_empty() {
            return Vec::new();
        }
        let catalog = self
            .cache
            .get_or_build(snapshot, &self.vocabularies.catalog);
        self.rank(query, &catalog, request)
    }

    /// Recommend products from a plain list of entries, normalizing every
    /// name for this call only.
    pub fn recommend_entries(
        &self,
        query: &str,
        entries: &[CatalogEntry],
        request: MatchRequest,
    ) -> Vec<Candidate> {
        if request.limit() == 0 || entries.is_empty() {
            return Vec::new();
        }
        let catalog = NormalizedCatalog::from_entries(entries, &self.vocabularies.catalog);
        self.rank(query, &catalog, request)
    }

    fn rank(
        &self,
        query: &str,
        catalog: &NormalizedCatalog,
        request: MatchRequest,
    ) -> Vec<Candidate> {
        let query = self.normalize_query(query);

        let mut candidates: Vec<Candidate> = catalog
            .entries()
            .iter()
            .filter_map(|entry| {
                let score = self.scorer.score(&query, &entry.name);
                (score >= request.threshold()).then(|| Candidate {
                    id: entry.id,
                    matched_name: entry.name.clone(),
                    score,
                })
            })
            .collect();

        // Stable: equal scores keep catalog order.
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(request.limit());
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchError, MatchRequest, Matcher};
    use crate::domain::product::{CatalogEntry, CatalogSnapshot};
    use crate::domain::types::{CatalogVersion, ProductId};
    use crate::processing::cache::NoCache;
    use crate::processing::normalize::{Vocabularies, Vocabulary};
    use crate::processing::scoring::{SimilarityScorer, TokenSortRatio};

    /// Scores by a fixed table keyed on the catalog name.
    struct TableScorer(Vec<(&'static str, u8)>);

    impl SimilarityScorer for TableScorer {
        fn score(&self, _left: &str, right: &str) -> u8 {
            self.0
                .iter()
                .find(|(name, _)| *name == right)
                .map(|(_, score)| *score)
                .unwrap_or(0)
        }
    }

    fn entry(id: i64, name: &str) -> CatalogEntry {
        CatalogEntry::new(ProductId::new(id).expect("valid id"), name)
    }

    fn request(limit: i64, threshold: i64) -> MatchRequest {
        MatchRequest::new(limit, threshold).expect("valid request")
    }

    fn ids(candidates: &[crate::domain::product::Candidate]) -> Vec<i64> {
        candidates.iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn request_validation() {
        assert_eq!(MatchRequest::new(-1, 50), Err(MatchError::InvalidLimit(-1)));
        assert_eq!(
            MatchRequest::new(10, -1),
            Err(MatchError::InvalidThreshold(-1))
        );
        assert_eq!(
            MatchRequest::new(10, 101),
            Err(MatchError::InvalidThreshold(101))
        );
        assert_eq!(
            MatchRequest::new(0, 0).map(|r| (r.limit(), r.threshold())),
            Ok((0, 0))
        );
        assert_eq!(
            MatchRequest::new(3, 100).map(|r| (r.limit(), r.threshold())),
            Ok((3, 100))
        );
    }

    #[test]
    fn default_request_is_ten_results_at_fifty() {
        let request = MatchRequest::default();
        assert_eq!((request.limit(), request.threshold()), (10, 50));
    }

    #[test]
    fn overrides_replace_only_present_values() {
        let base = MatchRequest::default();
        let request = base.with_overrides(Some(3), None).expect("valid overrides");
        assert_eq!((request.limit(), request.threshold()), (3, 50));

        let request = base
            .with_overrides(None, Some(80))
            .expect("valid overrides");
        assert_eq!((request.limit(), request.threshold()), (10, 80));

        assert_eq!(
            base.with_overrides(Some(-5), None),
            Err(MatchError::InvalidLimit(-5))
        );
    }

    #[test]
    fn sorts_descending_and_keeps_catalog_order_for_ties() {
        let matcher = Matcher::new(
            Vocabularies::default(),
            TableScorer(vec![("a", 60), ("b", 90), ("c", 60), ("d", 90), ("e", 10)]),
        );
        let entries = vec![
            entry(1, "a"),
            entry(2, "b"),
            entry(3, "c"),
            entry(4, "d"),
            entry(5, "e"),
        ];

        let result = matcher.recommend_entries("query", &entries, request(10, 50));

        assert_eq!(ids(&result), vec![2, 4, 1, 3]);
        assert_eq!(result[0].score, 90);
    }

    #[test]
    fn truncates_to_limit() {
        let matcher = Matcher::new(
            Vocabularies::default(),
            TableScorer(vec![("a", 70), ("b", 80), ("c", 90)]),
        );
        let entries = vec![entry(1, "a"), entry(2, "b"), entry(3, "c")];

        let result = matcher.recommend_entries("query", &entries, request(2, 0));

        assert_eq!(ids(&result), vec![3, 2]);
    }

    #[test]
    fn zero_limit_returns_nothing() {
        let matcher = Matcher::new(Vocabularies::default(), TokenSortRatio::default());
        let entries = vec![entry(1, "query")];

        assert!(
            matcher
                .recommend_entries("query", &entries, request(0, 0))
                .is_empty()
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        let matcher = Matcher::new(
            Vocabularies::default(),
            TableScorer(vec![("a", 50), ("b", 49)]),
        );
        let entries = vec![entry(1, "a"), entry(2, "b")];

        let result = matcher.recommend_entries("query", &entries, request(10, 50));

        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn both_sides_are_normalized_with_their_own_vocabulary() {
        let vocabularies = Vocabularies {
            catalog: Vocabulary::new(["Crystal"]).expect("valid vocabulary"),
            dealer: Vocabulary::new(["гель"]).expect("valid vocabulary"),
        };
        let matcher = Matcher::new(vocabularies, TokenSortRatio::default());
        let entries = vec![entry(1, "PROSEPTCrystal гель")];

        assert_eq!(
            matcher.normalize_query("PROSEPT Crystalгель"),
            "PROSEPT Crystal гель "
        );

        let result = matcher.recommend_entries("PROSEPT Crystalгель", &entries, request(10, 0));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].matched_name, "PROSEPT Crystal  гель");
        assert_eq!(result[0].score, 100);
    }

    #[test]
    fn snapshot_and_entry_paths_agree() {
        let matcher =
            Matcher::with_cache(Vocabularies::default(), TokenSortRatio::default(), NoCache);
        let entries = vec![entry(1, "Крем для рук"), entry(2, "Гель для душа")];
        let snapshot = CatalogSnapshot::new(CatalogVersion::new(7), entries.clone());

        assert_eq!(
            matcher.recommend("Крем для рук", &snapshot, request(10, 0)),
            matcher.recommend_entries("Крем для рук", &entries, request(10, 0))
        );
    }

    #[test]
    fn cached_snapshot_is_reused_for_the_same_version() {
        let matcher = Matcher::new(Vocabularies::default(), TokenSortRatio::default());
        let snapshot = CatalogSnapshot::new(CatalogVersion::new(1), vec![entry(1, "Крем для рук")]);

        matcher.recommend("Крем", &snapshot, request(10, 0));
        assert_eq!(
            matcher.cache().cached_version(),
            Some(CatalogVersion::new(1))
        );

        let updated = CatalogSnapshot::new(CatalogVersion::new(2), vec![entry(5, "Крем для рук")]);
        let result = matcher.recommend("Крем для рук", &updated, request(10, 0));
        assert_eq!(ids(&result), vec![5]);
        assert_eq!(
            matcher.cache().cached_version(),
            Some(CatalogVersion::new(2))
        );
    }
}
