//! # Document Catalog Module
//!
//! ## Purpose
//! Static, read-only, locale-aware list of legal document records, loaded
//! once at process start. The catalog owns the records; the search core only
//! ever reads them. Insertion order is preserved because it is the ranking
//! tie-breaker.
//!
//! ## Input/Output Specification
//! - **Input**: Catalog JSON file (array of `DocumentRecord`)
//! - **Output**: Ordered record iteration, id lookup
//! - **Lifetime**: Process lifetime; immutable after load

use crate::errors::{DiscoveryError, Result};
use crate::DocumentRecord;
use std::collections::HashMap;
use std::path::Path;

/// Immutable, insertion-ordered document catalog
#[derive(Debug)]
pub struct DocumentCatalog {
    records: Vec<DocumentRecord>,
    by_id: HashMap<String, usize>,
}

impl DocumentCatalog {
    /// Load the catalog from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DiscoveryError::CatalogLoadFailed {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;

        let records: Vec<DocumentRecord> =
            serde_json::from_str(&content).map_err(|e| DiscoveryError::CatalogLoadFailed {
                path: path.display().to_string(),
                details: e.to_string(),
            })?;

        let catalog = Self::from_records(records)?;
        tracing::info!(documents = catalog.len(), path = %path.display(), "catalog loaded");
        Ok(catalog)
    }

    /// Build a catalog from in-memory records, preserving their order.
    pub fn from_records(records: Vec<DocumentRecord>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_id.insert(record.id.clone(), index).is_some() {
                return Err(DiscoveryError::CatalogLoadFailed {
                    path: "<records>".to_string(),
                    details: format!("duplicate document id: {}", record.id),
                });
            }
        }

        Ok(Self { records, by_id })
    }

    /// Iterate records in catalog insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.records.iter()
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&DocumentRecord> {
        self.by_id.get(id).map(|&index| &self.records[index])
    }

    /// Number of documents in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocTranslation, Locale};
    use std::collections::HashMap;
    use std::io::Write;

    fn record(id: &str) -> DocumentRecord {
        let mut translations = HashMap::new();
        translations.insert(
            Locale::En,
            DocTranslation {
                name: id.replace('-', " "),
                description: String::new(),
                aliases: Vec::new(),
            },
        );
        DocumentRecord {
            id: id.to_string(),
            category: "Misc".to_string(),
            translations,
        }
    }

    #[test]
    fn preserves_insertion_order() {
        let catalog = DocumentCatalog::from_records(vec![
            record("lease-agreement"),
            record("vehicle-bill-of-sale"),
            record("promissory-note"),
        ])
        .unwrap();

        let ids: Vec<&str> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["lease-agreement", "vehicle-bill-of-sale", "promissory-note"]
        );
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = DocumentCatalog::from_records(vec![record("lease"), record("lease")])
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::CatalogLoadFailed { .. }));
    }

    #[test]
    fn loads_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!([
            {
                "id": "vehicle-bill-of-sale",
                "category": "Finance",
                "translations": {
                    "en": {
                        "name": "Vehicle Bill of Sale",
                        "description": "Document the sale of a vehicle",
                        "aliases": ["used car", "car sale"]
                    },
                    "es": {
                        "name": "Contrato de Compraventa de Vehículo",
                        "aliases": ["venta de coche"]
                    }
                }
            }
        ]);
        write!(file, "{}", json).unwrap();

        let catalog = DocumentCatalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        let doc = catalog.get("vehicle-bill-of-sale").unwrap();
        assert_eq!(doc.translation(Locale::Es).unwrap().aliases, vec!["venta de coche"]);
    }

    #[test]
    fn missing_file_fails_with_catalog_error() {
        let err = DocumentCatalog::from_file("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, DiscoveryError::CatalogLoadFailed { .. }));
    }
}
