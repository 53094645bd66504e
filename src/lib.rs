//! Shared library for the sqlref catalog tools.
//!
//! The crate exposes the catalog types (entries, editions, the validated
//! index) and utilities used by the CLI binaries. Public functions here form
//! the contract the binaries depend on: reference-root discovery, catalog
//! path resolution, and list parsing helpers.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod render;
mod schema_loader;

pub use catalog::{
    CatalogIndex, CatalogKey, CatalogRepository, Category, Entry, ReferenceCatalog, Scope,
    TermName, load_catalog_from_path,
};
pub use render::{
    CatalogStats, RenderedEntry, RenderedParseError, parse_rendered, render, render_all,
    render_entry, render_summary, summarize_entries,
};

const CATALOG_FILE: &str = "reference/sql_reference.json";
const SCHEMA_FILE: &str = "schema/sql_reference.schema.json";

/// Returns true when `candidate` looks like the reference root.
///
/// Root detection keys on the bundled catalog and its schema contract, so
/// discovery never walks past a directory that cannot actually serve lookups.
fn is_reference_root(candidate: &Path) -> bool {
    candidate.join(CATALOG_FILE).is_file() && candidate.join(SCHEMA_FILE).is_file()
}

/// Verifies that an explicit `SQLREF_ROOT` hint points at a valid root.
fn reference_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_reference_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_reference_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the reference root holding the bundled catalog and schema.
///
/// Search order: honor `SQLREF_ROOT` if it points at a real root, fall back
/// to climbing up from the current executable, then use the build-time hint.
/// Callers can treat failure as fatal because lookups cannot proceed without
/// a catalog.
pub fn find_reference_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("SQLREF_ROOT") {
        if let Some(root) = reference_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("SQLREF_ROOT_HINT") {
        if let Some(root) = reference_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!("Unable to locate the sqlref reference root. Set SQLREF_ROOT to a checkout containing {CATALOG_FILE}.");
}

/// The canonical catalog path under a reference root.
pub fn default_catalog_path(root: &Path) -> PathBuf {
    root.join(CATALOG_FILE)
}

/// Resolve the catalog file to load.
///
/// Precedence: an explicit override (CLI flag), the `SQLREF_CATALOG`
/// environment variable, then the bundled catalog under the discovered
/// reference root. Relative overrides resolve against the current directory,
/// matching how shells hand them in.
pub fn resolve_catalog_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path);
    }
    if let Ok(env_path) = env::var("SQLREF_CATALOG") {
        if !env_path.trim().is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    let root = find_reference_root()?;
    Ok(default_catalog_path(&root))
}

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
