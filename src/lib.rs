//! # Multilingual Document-Discovery Search Engine
//!
//! ## Overview
//! This library turns free-text, possibly bilingual (English/Spanish) user
//! queries into a ranked list of candidate legal documents. It combines an
//! always-available instant local keyword index with a slower, higher-quality
//! remote semantic search, while guaranteeing the user only ever sees results
//! for their most recent query.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `catalog`: Immutable, locale-aware document catalog loaded at startup
//! - `synonyms`: Bilingual synonym groups and stop-word filtering
//! - `normalize`: Query tokenization and bilingual term expansion
//! - `scorer`: Precision-biased relevance scoring of documents
//! - `local_index`: Instant local search with a per-session result cache
//! - `remote`: Remote semantic search collaborator interface
//! - `orchestrator`: Debouncing, epoch tracking, and result precedence
//! - `voice`: Optional voice-input collaborator adapter
//! - `config`: Configuration management and settings
//! - `errors`: Centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: Raw search text (typed or voice-recognized), locale
//! - **Output**: Ranked `SearchResult` list plus fallback / in-progress flags
//! - **Guarantees**: Deterministic ranking, stale-result suppression
//!
//! ## Usage
//! ```rust,no_run
//! use std::sync::Arc;
//! use discovery_search::{
//!     Config, DocumentCatalog, LocalIndexSearch, Locale,
//!     QueryNormalizer, SearchOrchestrator,
//! };
//! use discovery_search::remote::HttpRemoteSearch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config.toml")?;
//!     let catalog = Arc::new(DocumentCatalog::from_file(&config.catalog.path)?);
//!     let normalizer = QueryNormalizer::new(config.search.max_query_length)?;
//!     let local = Arc::new(LocalIndexSearch::new(catalog, normalizer, config.search.max_results));
//!     let remote = Arc::new(HttpRemoteSearch::new(&config.remote)?);
//!     let handle = SearchOrchestrator::spawn(local, remote, Locale::En, config.debounce.quiet_period());
//!
//!     let mut display = handle.subscribe();
//!     handle.submit("buying a used car");
//!     display.changed().await?;
//!     println!("{} results", display.borrow().results.len());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod catalog;
pub mod config;
pub mod errors;
pub mod local_index;
pub mod normalize;
pub mod orchestrator;
pub mod remote;
pub mod scorer;
pub mod synonyms;
pub mod voice;

// Utilities
pub mod utils;

// Re-exports for convenience
pub use catalog::DocumentCatalog;
pub use config::Config;
pub use errors::{DiscoveryError, Result};
pub use local_index::LocalIndexSearch;
pub use normalize::{NormalizedQuery, QueryNormalizer};
pub use orchestrator::{DisplayState, OrchestratorHandle, SearchOrchestrator};
pub use remote::RemoteSearch;
pub use scorer::RelevanceScorer;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Supported user-facing locales. Extensible; English is the fallback for
/// documents missing a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Es,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Es => write!(f, "es"),
        }
    }
}

impl FromStr for Locale {
    type Err = errors::DiscoveryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            other => Err(errors::DiscoveryError::ValidationFailed {
                field: "locale".to_string(),
                reason: format!("unsupported locale: {}", other),
            }),
        }
    }
}

/// Per-locale searchable text of a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocTranslation {
    /// Localized document name
    pub name: String,
    /// Localized description
    #[serde(default)]
    pub description: String,
    /// Localized aliases and keywords
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// A legal document template in the catalog. Immutable after load; owned by
/// the catalog and read-only to the search core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Unique, stable identifier (URL slug)
    pub id: String,
    /// Document category (e.g. "Finance", "Real Estate")
    pub category: String,
    /// Per-locale name/description/aliases
    pub translations: HashMap<Locale, DocTranslation>,
}

impl DocumentRecord {
    /// Resolve the translation for a locale, falling back to English when the
    /// requested locale is missing.
    pub fn translation(&self, locale: Locale) -> Option<&DocTranslation> {
        self.translations
            .get(&locale)
            .or_else(|| self.translations.get(&Locale::En))
    }
}

/// Which search path produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    /// Local keyword index match
    Keyword,
    /// Remote semantic search match
    Semantic,
}

/// A ranked search result. Produced fresh per search; never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Matched document id
    pub document_id: String,
    /// Localized title
    pub title: String,
    /// Localized description
    #[serde(default)]
    pub description: String,
    /// Confidence in [0, 1]
    pub confidence: f32,
    /// Which source produced the match
    pub source: ResultSource,
    /// Document category
    pub category: String,
    /// Ordered tags for display
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(locales: &[(Locale, &str)]) -> DocumentRecord {
        let translations = locales
            .iter()
            .map(|(locale, name)| {
                (
                    *locale,
                    DocTranslation {
                        name: name.to_string(),
                        description: String::new(),
                        aliases: Vec::new(),
                    },
                )
            })
            .collect();
        DocumentRecord {
            id: "vehicle-bill-of-sale".to_string(),
            category: "Finance".to_string(),
            translations,
        }
    }

    #[test]
    fn translation_falls_back_to_english() {
        let doc = record_with(&[(Locale::En, "Vehicle Bill of Sale")]);
        let translation = doc.translation(Locale::Es).unwrap();
        assert_eq!(translation.name, "Vehicle Bill of Sale");
    }

    #[test]
    fn translation_prefers_requested_locale() {
        let doc = record_with(&[
            (Locale::En, "Vehicle Bill of Sale"),
            (Locale::Es, "Contrato de Compraventa de Vehículo"),
        ]);
        let translation = doc.translation(Locale::Es).unwrap();
        assert_eq!(translation.name, "Contrato de Compraventa de Vehículo");
    }

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!(Locale::from_str("EN").unwrap(), Locale::En);
        assert_eq!(Locale::from_str("es").unwrap(), Locale::Es);
        assert!(Locale::from_str("fr").is_err());
    }
}
