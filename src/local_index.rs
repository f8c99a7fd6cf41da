//! # Local Index Search Module
//!
//! ## Purpose
//! Instant, always-available keyword search over the in-memory document
//! catalog. Scores every record, ranks deterministically, caps at top-K, and
//! caches ranked lists per raw query for the life of the session.
//!
//! ## Input/Output Specification
//! - **Input**: Raw query text, locale
//! - **Output**: Ranked `SearchResult` list (`source = Keyword`)
//! - **Guarantees**: Never fails; degrades to naive name matching when
//!   normalization does
//!
//! ## Ranking
//! Stable sort by score descending; equal scores keep catalog insertion
//! order, so equal-score documents never reorder between runs. Confidence
//! follows the fixed ladder `max(0.9 - rank * 0.1, 0.1)`.

use crate::catalog::DocumentCatalog;
use crate::normalize::QueryNormalizer;
use crate::scorer::RelevanceScorer;
use crate::utils::Timer;
use crate::{Locale, ResultSource, SearchResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Confidence for the top-ranked result
const CONFIDENCE_TOP: f32 = 0.9;
/// Confidence decrement per rank position
const CONFIDENCE_STEP: f32 = 0.1;
/// Confidence floor
const CONFIDENCE_FLOOR: f32 = 0.1;

/// Session-scoped counters for cache behavior and query latency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalIndexMetrics {
    /// Queries answered from the result cache
    pub cache_hits: u64,
    /// Queries that ran the full score-and-rank pipeline
    pub cache_misses: u64,
    /// Milliseconds spent on the most recent uncached query
    pub last_query_ms: u64,
}

/// Instant local catalog search with a per-session result cache
pub struct LocalIndexSearch {
    catalog: Arc<DocumentCatalog>,
    normalizer: QueryNormalizer,
    max_results: usize,
    // Keyed by raw trimmed query text; unbounded for the session lifetime.
    cache: RwLock<HashMap<String, Vec<SearchResult>>>,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    last_query_ms: AtomicU64,
}

impl LocalIndexSearch {
    /// Create a new local index over the catalog.
    pub fn new(
        catalog: Arc<DocumentCatalog>,
        normalizer: QueryNormalizer,
        max_results: usize,
    ) -> Self {
        Self {
            catalog,
            normalizer,
            max_results,
            cache: RwLock::new(HashMap::new()),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            last_query_ms: AtomicU64::new(0),
        }
    }

    /// Search the catalog. Never fails: normalization problems degrade to a
    /// naive case-insensitive name match so the fast path always answers.
    pub fn search(&self, raw: &str, locale: Locale) -> Vec<SearchResult> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        if let Some(cached) = self.cache.read().get(trimmed) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(query = trimmed, "local cache hit");
            return cached.clone();
        }

        let timer = Timer::new("local_index_search");
        let results = match self.normalizer.normalize(trimmed, locale) {
            Ok(query) => self.ranked_search(&query, locale),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    category = err.category(),
                    "normalization failed, degrading to naive name match"
                );
                let degraded = self.naive_name_match(trimmed, locale);
                // Degraded output is not cached: a later healthy run of the
                // same text must not be shadowed by it.
                self.last_query_ms.store(timer.stop(), Ordering::Relaxed);
                return degraded;
            }
        };

        self.cache_misses.fetch_add(1, Ordering::Relaxed);
        self.cache
            .write()
            .insert(trimmed.to_string(), results.clone());
        self.last_query_ms.store(timer.stop(), Ordering::Relaxed);

        results
    }

    /// Score every catalog record, rank, and cap.
    fn ranked_search(&self, query: &crate::normalize::NormalizedQuery, locale: Locale) -> Vec<SearchResult> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(&crate::DocumentRecord, u32)> = self
            .catalog
            .iter()
            .filter_map(|doc| {
                let score = RelevanceScorer::score(doc, query, locale);
                (score > 0).then_some((doc, score))
            })
            .collect();

        // Stable sort: ties keep catalog insertion order.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(self.max_results);

        scored
            .iter()
            .enumerate()
            .map(|(rank, &(doc, _))| self.to_result(doc, locale, rank))
            .collect()
    }

    /// Degraded mode: case-insensitive substring match of the raw trimmed
    /// query against localized document names only.
    fn naive_name_match(&self, trimmed: &str, locale: Locale) -> Vec<SearchResult> {
        let needle = trimmed.to_lowercase();
        self.catalog
            .iter()
            .filter(|doc| {
                doc.translation(locale)
                    .map(|t| t.name.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .take(self.max_results)
            .enumerate()
            .map(|(rank, doc)| self.to_result(doc, locale, rank))
            .collect()
    }

    fn to_result(&self, doc: &crate::DocumentRecord, locale: Locale, rank: usize) -> SearchResult {
        let translation = doc.translation(locale);
        SearchResult {
            document_id: doc.id.clone(),
            title: translation.map(|t| t.name.clone()).unwrap_or_else(|| doc.id.clone()),
            description: translation.map(|t| t.description.clone()).unwrap_or_default(),
            confidence: confidence_for_rank(rank),
            source: ResultSource::Keyword,
            category: doc.category.clone(),
            tags: vec![doc.category.to_lowercase()],
        }
    }

    /// Session metrics snapshot.
    pub fn metrics(&self) -> LocalIndexMetrics {
        LocalIndexMetrics {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            last_query_ms: self.last_query_ms.load(Ordering::Relaxed),
        }
    }

    /// Number of distinct queries cached this session.
    pub fn cached_query_count(&self) -> usize {
        self.cache.read().len()
    }
}

/// Fixed confidence ladder: rank 0 -> 0.9, rank 1 -> 0.8, ... floor 0.1.
fn confidence_for_rank(rank: usize) -> f32 {
    (CONFIDENCE_TOP - rank as f32 * CONFIDENCE_STEP).max(CONFIDENCE_FLOOR)
}
