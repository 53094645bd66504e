// Centralized integration suite for the catalog tools; exercises schema
// validation, load-time rejection rules, lookup semantics, and rendering so
// changes surface in one place.
mod support;

use anyhow::Result;
use serde_json::{Value, json};
use sqlref::{
    CatalogIndex, CatalogKey, CatalogRepository, Category, TermName, load_catalog_from_path,
    parse_rendered, render, render_all, resolve_catalog_path,
};
use std::collections::BTreeSet;
use std::path::PathBuf;
use support::{base_catalog, golden_catalog_path, write_catalog};
use tempfile::TempDir;

#[test]
fn golden_catalog_loads_and_indexes() -> Result<()> {
    let index = CatalogIndex::load(&golden_catalog_path())?;
    assert_eq!(index.key(), &CatalogKey("ansi_sql_v1".to_string()));
    assert!(index.entries().len() >= 20, "golden catalog is substantial");

    let names: BTreeSet<&str> = index.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names.len(),
        index.entries().len(),
        "term names are unique across the catalog"
    );

    let category_ids: BTreeSet<&str> = index
        .catalog()
        .scope
        .categories
        .keys()
        .map(String::as_str)
        .collect();
    for entry in index.entries() {
        assert!(category_ids.contains(entry.category.as_str()));
    }
    Ok(())
}

#[test]
fn lookup_hits_misses_and_category_listing() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_catalog(dir.path(), &base_catalog());
    let index = CatalogIndex::load(&path)?;

    let join = index
        .entry(&TermName("JOIN".to_string()))
        .expect("JOIN entry present");
    assert_eq!(join.category, Category::Join);

    assert!(index.entry(&TermName("SELECT".to_string())).is_none());

    let joins: Vec<_> = index.entries_in_category(&Category::Join).collect();
    assert_eq!(joins.len(), 1);
    assert_eq!(joins[0].name.as_str(), "JOIN");
    Ok(())
}

#[test]
fn duplicate_term_name_fails_load() -> Result<()> {
    let dir = TempDir::new()?;
    let mut catalog = base_catalog();
    let duplicate = catalog["entries"][0].clone();
    catalog["entries"].as_array_mut().unwrap().push(duplicate);
    let path = write_catalog(dir.path(), &catalog);

    let err = CatalogIndex::load(&path).expect_err("duplicate names must fail load");
    assert!(
        format!("{err:#}").contains("duplicate term name JOIN"),
        "unexpected error: {err:#}"
    );
    Ok(())
}

#[test]
fn unknown_category_fails_load() -> Result<()> {
    let dir = TempDir::new()?;
    let mut catalog = base_catalog();
    catalog["entries"][1]["category"] = json!("window");
    let path = write_catalog(dir.path(), &catalog);

    let err = CatalogIndex::load(&path).expect_err("unknown category must fail load");
    assert!(
        format!("{err:#}").contains("unknown category window"),
        "unexpected error: {err:#}"
    );
    Ok(())
}

#[test]
fn missing_required_field_fails_schema_validation() -> Result<()> {
    let dir = TempDir::new()?;
    let mut catalog = base_catalog();
    catalog["entries"][0]
        .as_object_mut()
        .unwrap()
        .remove("example");
    let path = write_catalog(dir.path(), &catalog);

    let err = CatalogIndex::load(&path).expect_err("missing example must fail load");
    assert!(
        format!("{err:#}").contains("failed schema validation"),
        "unexpected error: {err:#}"
    );
    Ok(())
}

#[test]
fn unexpected_schema_version_fails_load() -> Result<()> {
    let dir = TempDir::new()?;
    let mut catalog = base_catalog();
    catalog["schema_version"] = json!("sql_reference_v9");
    let path = write_catalog(dir.path(), &catalog);

    let err = CatalogIndex::load(&path).expect_err("unknown schema version must fail load");
    assert!(
        format!("{err:#}").contains("not in allowed set"),
        "unexpected error: {err:#}"
    );
    Ok(())
}

#[test]
fn empty_entry_list_fails_load() -> Result<()> {
    let dir = TempDir::new()?;
    let mut catalog = base_catalog();
    catalog["entries"] = json!([]);
    let path = write_catalog(dir.path(), &catalog);

    assert!(CatalogIndex::load(&path).is_err());
    Ok(())
}

#[test]
fn unresolvable_see_also_target_fails_load() -> Result<()> {
    let dir = TempDir::new()?;
    let mut catalog = base_catalog();
    catalog["entries"][0]["see_also"] = json!(["HAVING"]);
    let path = write_catalog(dir.path(), &catalog);

    let err = CatalogIndex::load(&path).expect_err("dangling cross reference must fail load");
    assert!(
        format!("{err:#}").contains("unknown term 'HAVING'"),
        "unexpected error: {err:#}"
    );
    Ok(())
}

#[test]
fn multiline_description_fails_load() -> Result<()> {
    let dir = TempDir::new()?;
    let mut catalog = base_catalog();
    catalog["entries"][0]["description"] = json!("first line\nsecond line");
    let path = write_catalog(dir.path(), &catalog);

    let err = CatalogIndex::load(&path).expect_err("multi-line description must fail load");
    assert!(
        format!("{err:#}").contains("single line"),
        "unexpected error: {err:#}"
    );
    Ok(())
}

#[test]
fn listing_preserves_source_document_order() -> Result<()> {
    let path = golden_catalog_path();
    let index = CatalogIndex::load(&path)?;

    let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let source_order: Vec<&str> = raw["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    let listed_order: Vec<&str> = index.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(listed_order, source_order);
    Ok(())
}

#[test]
fn category_filter_is_an_order_preserving_subsequence() -> Result<()> {
    let index = CatalogIndex::load(&golden_catalog_path())?;
    let all: Vec<&str> = index.entries().iter().map(|e| e.name.as_str()).collect();

    for category in [Category::Basic, Category::Join, Category::RelationalAlgebra] {
        let filtered: Vec<&str> = index
            .entries_in_category(&category)
            .map(|e| e.name.as_str())
            .collect();
        assert!(!filtered.is_empty(), "{} has entries", category.as_str());

        // Subsequence check: positions in the full listing strictly increase.
        let mut last = None;
        for name in &filtered {
            let at = all.iter().position(|n| n == name).unwrap();
            assert!(last.map_or(true, |prev| at > prev));
            last = Some(at);
        }

        for entry in index.entries_in_category(&category) {
            assert_eq!(entry.category, category);
        }
    }
    Ok(())
}

#[test]
fn rendered_catalog_round_trips_identifying_fields() -> Result<()> {
    let index = CatalogIndex::load(&golden_catalog_path())?;
    let rendered = render_all(index.entries());
    let parsed = parse_rendered(&rendered).expect("rendered catalog re-parses");

    assert_eq!(parsed.len(), index.entries().len());
    for (entry, back) in index.entries().iter().zip(&parsed) {
        assert_eq!(back.name, entry.name.as_str());
        assert_eq!(back.category, entry.category);
        assert_eq!(back.description, entry.description);
    }
    Ok(())
}

#[test]
fn single_entry_render_matches_concatenation() -> Result<()> {
    let index = CatalogIndex::load(&golden_catalog_path())?;
    let first_two = &index.entries()[..2];
    let concatenated = render_all(first_two);
    assert_eq!(
        concatenated,
        format!("{}{}", render(&first_two[0]), render(&first_two[1]))
    );
    Ok(())
}

#[test]
fn repository_resolves_entries_per_edition() -> Result<()> {
    let dir = TempDir::new()?;
    let fixture_path = write_catalog(dir.path(), &base_catalog());

    let mut repository = CatalogRepository::default();
    repository.register(load_catalog_from_path(&golden_catalog_path())?);
    repository.register(load_catalog_from_path(&fixture_path)?);

    let golden_key = CatalogKey("ansi_sql_v1".to_string());
    let fixture_key = CatalogKey("fixture_v1".to_string());

    let join = repository
        .find_entry(&fixture_key, &TermName("JOIN".to_string()))
        .expect("fixture edition resolves JOIN");
    assert_eq!(join.category, Category::Join);

    assert!(
        repository
            .find_entry(&golden_key, &TermName("JOIN".to_string()))
            .is_none(),
        "the golden edition documents specific join types, not a bare JOIN"
    );
    assert!(
        repository
            .find_entry(&golden_key, &TermName("INNER JOIN".to_string()))
            .is_some()
    );
    assert!(
        repository
            .get(&CatalogKey("missing_v1".to_string()))
            .is_none()
    );
    Ok(())
}

#[test]
fn explicit_catalog_override_wins_path_resolution() -> Result<()> {
    let override_path = PathBuf::from("/tmp/some/catalog.json");
    let resolved = resolve_catalog_path(Some(override_path.clone()))?;
    assert_eq!(resolved, override_path);
    Ok(())
}
