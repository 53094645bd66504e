//! Holds one or more reference catalogs for lookup by key.
//!
//! The repository lets hosts resolve entries using an explicit catalog key,
//! keeping edition selection unambiguous even when several catalog snapshots
//! (e.g. dialect variants) are loaded side by side.

use crate::catalog::identity::{CatalogKey, TermName};
use crate::catalog::model::{Entry, ReferenceCatalog};
use std::collections::BTreeMap;

#[derive(Default)]
/// In-memory store for reference catalogs keyed by `CatalogKey`.
pub struct CatalogRepository {
    catalogs: BTreeMap<CatalogKey, ReferenceCatalog>,
}

impl CatalogRepository {
    /// Register a catalog edition for later lookup.
    pub fn register(&mut self, catalog: ReferenceCatalog) {
        self.catalogs.insert(catalog.key.clone(), catalog);
    }

    /// Fetch a catalog by key, if present.
    pub fn get(&self, key: &CatalogKey) -> Option<&ReferenceCatalog> {
        self.catalogs.get(key)
    }

    /// Resolve an entry inside a registered catalog.
    pub fn find_entry(&self, key: &CatalogKey, name: &TermName) -> Option<&Entry> {
        self.get(key)?.entries.iter().find(|entry| &entry.name == name)
    }
}
