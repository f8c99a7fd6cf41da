//! # Query Normalization Module
//!
//! ## Purpose
//! Turns raw, possibly bilingual query text into the token sets consumed by
//! the relevance scorer: the literal surviving tokens and their bilingual
//! synonym expansion.
//!
//! ## Input/Output Specification
//! - **Input**: Raw query text, locale
//! - **Output**: `NormalizedQuery` with original and expanded token sets
//! - **Determinism**: Pure function of (text, locale); sets iterate in
//!   lexicographic order
//!
//! Keeping `original_tokens` separate from `expanded_tokens` is required by
//! the scorer's weighting: literal matches count double.

use crate::errors::{DiscoveryError, Result};
use crate::synonyms::SynonymIndex;
use crate::utils::TextUtils;
use crate::Locale;
use regex::Regex;
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

/// Tokenized and bilingually expanded query. Value type; discarded after
/// use. An empty pair of sets means "no searchable terms", not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// Surviving literal tokens
    pub original_tokens: BTreeSet<String>,
    /// Union of all synonym groups reachable from the originals, including
    /// the originals themselves
    pub expanded_tokens: BTreeSet<String>,
}

impl NormalizedQuery {
    /// Whether normalization left nothing to search for.
    pub fn is_empty(&self) -> bool {
        self.original_tokens.is_empty()
    }
}

/// Query normalization pipeline: case folding, quote stripping, word
/// splitting, stop-word filtering, and bilingual synonym expansion.
pub struct QueryNormalizer {
    non_word: Regex,
    synonyms: SynonymIndex,
    max_query_length: usize,
}

impl QueryNormalizer {
    /// Create a new normalizer. Compiles the token-splitting pattern once.
    pub fn new(max_query_length: usize) -> Result<Self> {
        let non_word = Regex::new(r"[^\w\s]+").map_err(|e| DiscoveryError::Internal {
            message: format!("Invalid token pattern: {}", e),
        })?;

        Ok(Self {
            non_word,
            synonyms: SynonymIndex::new(),
            max_query_length,
        })
    }

    /// Normalize raw query text for the given locale.
    ///
    /// The locale currently does not change tokenization — the stop-word set
    /// and synonym groups are bilingual — but it is part of the contract so
    /// locale-specific stemming can be added without a signature change.
    pub fn normalize(&self, raw: &str, locale: Locale) -> Result<NormalizedQuery> {
        if raw.chars().count() > self.max_query_length {
            return Err(DiscoveryError::NormalizationFailed {
                reason: format!(
                    "query exceeds {} characters: {}",
                    self.max_query_length,
                    TextUtils::truncate(raw, 40)
                ),
            });
        }

        let folded: String = raw.nfc().collect::<String>().to_lowercase();
        let unquoted = folded.replace(['\'', '"', '\u{2018}', '\u{2019}', '\u{201c}', '\u{201d}'], "");
        let spaced = self.non_word.replace_all(&unquoted, " ");

        let mut original_tokens = BTreeSet::new();
        let mut expanded_tokens = BTreeSet::new();

        for token in spaced.split_whitespace() {
            if token.chars().count() <= 1 || self.synonyms.is_stop_word(token) {
                continue;
            }

            original_tokens.insert(token.to_string());
            expanded_tokens.insert(token.to_string());

            if let Some(group) = self.synonyms.expand(token) {
                for term in group {
                    expanded_tokens.insert(term.clone());
                }
            }
        }

        tracing::debug!(
            %locale,
            original = original_tokens.len(),
            expanded = expanded_tokens.len(),
            "query normalized"
        );

        Ok(NormalizedQuery {
            original_tokens,
            expanded_tokens,
        })
    }
}
