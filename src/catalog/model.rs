//! Deserializable representation of `reference/sql_reference.json`.
//!
//! The types mirror the catalog schema so the CLI and tests can reason about
//! documented terms without ad-hoc JSON handling. Use `CatalogIndex` for
//! validation and name lookup; use these structs when the full catalog surface
//! is required (scope, categories, cross-references).

use crate::catalog::identity::{CatalogKey, Category, TermName};
use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
/// Full reference catalog as stored on disk.
pub struct ReferenceCatalog {
    pub schema_version: String,
    pub key: CatalogKey,
    pub scope: Scope,
    pub entries: Vec<Entry>,
}

#[derive(Clone, Debug, Deserialize)]
/// Top-level catalog scope: what the edition covers and which categories it
/// defines. Category ids map to human-readable labels.
pub struct Scope {
    pub description: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub categories: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Deserialize)]
/// One documented SQL term.
///
/// `example` is a literal code sample; it is never parsed or executed, only
/// rendered. `see_also` names must resolve to other entries in the same
/// catalog.
pub struct Entry {
    pub name: TermName,
    pub category: Category,
    pub description: String,
    pub example: String,
    #[serde(default)]
    pub see_also: Vec<TermName>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ReferenceCatalog {
    /// Human-readable label for a category id, when the scope defines one.
    pub fn category_label(&self, category: &Category) -> Option<&str> {
        self.scope
            .categories
            .get(category.as_str())
            .map(String::as_str)
    }
}

/// Read and parse a reference catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<ReferenceCatalog> {
    let data = fs::read_to_string(path)?;
    let catalog: ReferenceCatalog = serde_json::from_str(&data)?;
    Ok(catalog)
}
