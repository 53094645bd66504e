//! Reference catalog wiring.
//!
//! This module wraps the JSON catalog under `reference/sql_reference.json` so
//! the CLI can load a validated snapshot and expose consistent identifiers.
//! Types here mirror the schema fields; callers use `CatalogIndex` for fast
//! lookups and `CatalogRepository` when multiple editions are registered.

pub mod identity;
pub mod index;
pub mod model;
pub mod repository;

pub use identity::{CatalogKey, Category, TermName};
pub use index::CatalogIndex;
pub use model::{Entry, ReferenceCatalog, Scope};
pub use repository::CatalogRepository;

pub use model::load_catalog_from_path;
