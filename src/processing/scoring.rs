use std::sync::LazyLock;

use rapidfuzz::distance::indel;
use regex::Regex;
use serde::Deserialize;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").unwrap());

/// Similarity of two product names on a 0..=100 scale.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, left: &str, right: &str) -> u8;
}

/// Token-sort ratio: both texts are reduced to their words, the words are
/// sorted and the indel edit-distance ratio of the results is scaled to a
/// percentage, rounded half to even. Word order does not affect the score.
///
/// Non-word characters count as separators. Letters of any script are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenSortRatio {
    /// Lowercase both texts before comparison.
    pub fold_case: bool,
}

impl TokenSortRatio {
    pub fn new(fold_case: bool) -> Self {
        Self { fold_case }
    }

    fn sorted_tokens(&self, text: &str) -> String {
        let cleaned = NON_WORD.replace_all(text, " ");
        let cleaned = if self.fold_case {
            cleaned.to_lowercase()
        } else {
            cleaned.into_owned()
        };

        let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
        tokens.sort_unstable();
        tokens.join(" ")
    }
}

impl SimilarityScorer for TokenSortRatio {
    fn score(&self, left: &str, right: &str) -> u8 {
        let left = self.sorted_tokens(left);
        let right = self.sorted_tokens(right);
        if left.is_empty() || right.is_empty() {
            return 0;
        }

        let total = left.chars().count() + right.chars().count();
        let distance = indel::distance(left.chars(), right.chars()).min(total);
        percentage(total - distance, total)
    }
}

/// `100 * matched / total` rounded half to even, computed without floats so
/// that exact halves are recognized.
fn percentage(matched: usize, total: usize) -> u8 {
    let scaled = matched * 100;
    let quotient = scaled / total;
    let twice_remainder = 2 * (scaled % total);

    let rounded = if twice_remainder > total || (twice_remainder == total && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded.min(100) as u8
}
