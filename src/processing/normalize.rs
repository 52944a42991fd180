//! Splitting of vocabulary words fused into neighbouring text.
//!
//! Dealer listings and catalog exports often glue marketing words, units and
//! category names to the rest of the title (`PROSEPTCrystal`,
//! `средстводлястекол`). Surrounding such tokens with spaces lets the
//! token-sort scorer see them as separate words.

use serde::Deserialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("vocabulary token at position {index} is empty")]
    EmptyToken { index: usize },
}

/// Ordered list of literal, case-sensitive tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct Vocabulary {
    tokens: Vec<String>,
}

impl Vocabulary {
    pub fn new<I, S>(tokens: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if let Some(index) = tokens.iter().position(|token| token.is_empty()) {
            return Err(VocabularyError::EmptyToken { index });
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Shorthand for [`split_concatenated`] with this vocabulary.
    pub fn split(&self, text: &str) -> String {
        split_concatenated(text, self)
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = VocabularyError;

    fn try_from(tokens: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(tokens)
    }
}

/// Token lists for both sides of a match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Vocabularies {
    /// Applied to catalog product names.
    pub catalog: Vocabulary,
    /// Applied to free-text dealer listings.
    pub dealer: Vocabulary,
}

/// Surround vocabulary tokens found inside `text` with spaces.
///
/// Tokens are visited in vocabulary order and each one is separated at its
/// first occurrence only, in the text produced by the previous tokens. Later
/// occurrences of the same token stay fused. Duplicated tokens in the
/// vocabulary split the same first occurrence again.
pub fn split_concatenated(text: &str, vocabulary: &Vocabulary) -> String {
    let mut result = text.to_string();
    for token in vocabulary.tokens() {
        if let Some((head, tail)) = result.split_once(token.as_str()) {
            result = format!("{head} {token} {tail}");
        }
    }
    result
}
