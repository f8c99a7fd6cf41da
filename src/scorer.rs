//! # Relevance Scoring Module
//!
//! ## Purpose
//! Scores a candidate document against a normalized query. Intentionally a
//! simple precision-biased heuristic, not a full-text-search model: literal
//! query tokens count double, synonym-expanded tokens count once, and there
//! is no normalization by document length.
//!
//! ## Input/Output Specification
//! - **Input**: Document record, normalized query, locale
//! - **Output**: Integer score >= 0; zero means "no match"
//! - **Determinism**: Pure function of (doc, query, locale); no hidden state

use crate::normalize::NormalizedQuery;
use crate::{DocumentRecord, Locale};

/// Weight for a literal query token found in the document text
const ORIGINAL_TOKEN_WEIGHT: u32 = 2;
/// Weight for a synonym-expanded token found in the document text
const EXPANDED_TOKEN_WEIGHT: u32 = 1;

/// Precision-biased document scorer
pub struct RelevanceScorer;

impl RelevanceScorer {
    /// Score a document against a normalized query for a locale.
    ///
    /// The searchable text is the localized name, description, category, and
    /// aliases concatenated and case-folded. Documents with no resolvable
    /// translation (not even the English fallback) score zero.
    pub fn score(doc: &DocumentRecord, query: &NormalizedQuery, locale: Locale) -> u32 {
        let Some(translation) = doc.translation(locale) else {
            return 0;
        };

        let mut searchable = String::with_capacity(
            translation.name.len() + translation.description.len() + doc.category.len() + 16,
        );
        searchable.push_str(&translation.name);
        searchable.push(' ');
        searchable.push_str(&translation.description);
        searchable.push(' ');
        searchable.push_str(&doc.category);
        for alias in &translation.aliases {
            searchable.push(' ');
            searchable.push_str(alias);
        }
        let searchable = searchable.to_lowercase();

        let mut score = 0;
        for token in &query.original_tokens {
            if searchable.contains(token.as_str()) {
                score += ORIGINAL_TOKEN_WEIGHT;
            }
        }
        for token in &query.expanded_tokens {
            if searchable.contains(token.as_str()) {
                score += EXPANDED_TOKEN_WEIGHT;
            }
        }

        score
    }
}
