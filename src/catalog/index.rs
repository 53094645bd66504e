//! Indexed view of a reference catalog instance.
//!
//! The index enforces the expected catalog schema version and provides fast
//! lookup by term name. It is intentionally strict about duplicates and
//! unknown schema versions so consumers cannot silently serve a partially
//! valid catalog.

use crate::catalog::load_catalog_from_path;
use crate::catalog::{CatalogKey, Category, Entry, ReferenceCatalog, TermName};
use crate::schema_loader::{SchemaLoadOptions, load_json_schema};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

// The tool currently ships a single catalog format; reject unexpected
// versions rather than risk rendering entries with mismatched metadata.
const DEFAULT_SCHEMA_VERSION: &str = "sql_reference_v1";

#[derive(Debug)]
/// Reference catalog plus a derived index keyed by term name.
///
/// The index maps names to positions in the ordered entry list, so document
/// order stays the single source of truth for listings.
pub struct CatalogIndex {
    catalog_key: CatalogKey,
    catalog: ReferenceCatalog,
    by_name: BTreeMap<TermName, usize>,
}

impl CatalogIndex {
    /// Load and validate the catalog from disk.
    ///
    /// Validates the raw document against the catalog JSON Schema, checks the
    /// schema version and key, ensures term names are unique, and builds a
    /// deterministic BTreeMap for fast lookups. Any violation fails the whole
    /// load; no partial catalog is served.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;

        let catalog =
            load_catalog_from_path(path).with_context(|| format!("loading {}", path.display()))?;
        validate_schema_version(&catalog.schema_version)?;
        validate_catalog_key(&catalog.key)?;
        let by_name = build_index(&catalog)?;
        Ok(Self {
            catalog_key: catalog.key.clone(),
            catalog,
            by_name,
        })
    }

    /// The catalog key declared in the loaded file.
    pub fn key(&self) -> &CatalogKey {
        &self.catalog_key
    }

    /// Resolve an entry by exact term name.
    ///
    /// Returns `None` instead of erroring; a miss is a normal empty result,
    /// reported by callers with whatever context referenced the name.
    pub fn entry(&self, name: &TermName) -> Option<&Entry> {
        self.by_name
            .get(name)
            .map(|&pos| &self.catalog.entries[pos])
    }

    /// All entries in document order.
    pub fn entries(&self) -> &[Entry] {
        &self.catalog.entries
    }

    /// Document-order subsequence of entries whose category equals `category`.
    pub fn entries_in_category<'a>(
        &'a self,
        category: &'a Category,
    ) -> impl Iterator<Item = &'a Entry> {
        self.catalog
            .entries
            .iter()
            .filter(move |entry| &entry.category == category)
    }

    /// Iterates term names in stable order.
    pub fn names(&self) -> impl Iterator<Item = &TermName> {
        self.by_name.keys()
    }

    /// Access the underlying catalog (scope, categories, etc.).
    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !schema_version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([default_catalog_schema_version()])
}

fn default_catalog_schema_version() -> String {
    catalog_schema_version_from_disk().unwrap_or_else(|| DEFAULT_SCHEMA_VERSION.to_string())
}

fn catalog_schema_version_from_disk() -> Option<String> {
    let path = canonical_catalog_schema_path();
    let file = File::open(path).ok()?;
    let value: Value = serde_json::from_reader(BufReader::new(file)).ok()?;
    value
        .pointer("/properties/schema_version/const")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn canonical_catalog_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/sql_reference.schema.json")
}

fn validate_catalog_key(key: &CatalogKey) -> Result<()> {
    if key.0.is_empty() {
        bail!("catalog key must not be empty");
    }

    if !key
        .0
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!("catalog key must match ^[A-Za-z0-9_.-]+$, got {}", key.0);
    }

    Ok(())
}

fn build_index(catalog: &ReferenceCatalog) -> Result<BTreeMap<TermName, usize>> {
    if catalog.entries.is_empty() {
        bail!("catalog contains no entries");
    }

    if catalog.scope.description.trim().is_empty() {
        bail!("catalog scope description must not be empty");
    }

    let category_ids: BTreeSet<&str> = catalog
        .scope
        .categories
        .keys()
        .map(String::as_str)
        .collect();
    if category_ids.is_empty() {
        bail!("catalog scope must define at least one category");
    }

    let known_names: BTreeSet<&TermName> = catalog.entries.iter().map(|entry| &entry.name).collect();

    let mut map = BTreeMap::new();
    for (pos, entry) in catalog.entries.iter().enumerate() {
        if entry.name.as_str().trim().is_empty() {
            bail!("encountered entry with no name");
        }
        if map.contains_key(&entry.name) {
            bail!("duplicate term name {}", entry.name.as_str());
        }
        if !category_ids.contains(entry.category.as_str()) {
            bail!(
                "entry {} references unknown category {}",
                entry.name.as_str(),
                entry.category.as_str()
            );
        }
        if entry.description.trim().is_empty() {
            bail!("entry {} has an empty description", entry.name.as_str());
        }
        // Descriptions are single paragraphs; the rendered form relies on one
        // description per line.
        if entry.description.contains('\n') {
            bail!(
                "entry {} description must be a single line",
                entry.name.as_str()
            );
        }
        if entry.example.trim().is_empty() {
            bail!("entry {} has an empty example", entry.name.as_str());
        }
        for target in &entry.see_also {
            if target == &entry.name {
                bail!("entry {} references itself in see_also", entry.name.as_str());
            }
            if !known_names.contains(target) {
                bail!(
                    "entry {} references unknown term '{}'",
                    entry.name.as_str(),
                    target.as_str()
                );
            }
        }
        map.insert(entry.name.clone(), pos);
    }
    Ok(map)
}

fn validate_against_schema(catalog_path: &Path) -> Result<()> {
    let catalog_file = File::open(catalog_path)
        .with_context(|| format!("opening catalog {}", catalog_path.display()))?;
    let catalog_value: Value = serde_json::from_reader(BufReader::new(catalog_file))
        .with_context(|| format!("parsing catalog {}", catalog_path.display()))?;

    let catalog_version = catalog_value
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let schema_path = resolve_catalog_schema_path(catalog_path);
    let allowed = allowed_schema_versions();
    let schema = load_json_schema(
        &schema_path,
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            expected_version: Some(&catalog_version),
            patch_schema_version_const: true,
            ..Default::default()
        },
    )
    .with_context(|| format!("loading catalog schema {}", schema_path.display()))?;

    if let Err(errors) = schema.compiled.validate(&catalog_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "reference catalog {} failed schema validation ({}):\n{}",
            catalog_path.display(),
            schema.schema_version,
            details
        );
    }
    Ok(())
}

fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(base) = catalog_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join("schema/sql_reference.schema.json");
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schema/sql_reference.schema.json")
}
