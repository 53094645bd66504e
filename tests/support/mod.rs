use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn golden_catalog_path() -> PathBuf {
    repo_root().join("reference/sql_reference.json")
}

/// Minimal valid catalog for mutation-based fixtures.
///
/// Matches the §8 scenario: one join entry and one basic entry.
pub fn base_catalog() -> Value {
    json!({
        "schema_version": "sql_reference_v1",
        "key": "fixture_v1",
        "scope": {
            "description": "fixture catalog",
            "categories": {
                "basic": "Basic Clauses",
                "join": "Join Types"
            }
        },
        "entries": [
            {
                "name": "JOIN",
                "category": "join",
                "description": "Combines rows from two tables by a match condition.",
                "example": "SELECT * FROM a JOIN b ON a.id = b.a_id;"
            },
            {
                "name": "WHERE",
                "category": "basic",
                "description": "Filters rows by a predicate.",
                "example": "SELECT * FROM t WHERE x > 1;"
            }
        ]
    })
}

/// Write a catalog fixture to `dir` and return its path.
///
/// The schema is resolved from the canonical copy under the manifest dir, so
/// fixtures only need the catalog file itself.
pub fn write_catalog(dir: &Path, value: &Value) -> PathBuf {
    let path = dir.join("catalog.json");
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).expect("write fixture catalog");
    path
}
