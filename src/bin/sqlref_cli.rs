//! Command-line lookup over the SQL reference catalog.
//!
//! With no arguments the full catalog is rendered behind a summary header.
//! A positional term does an exact-name lookup; `--category` renders the
//! document-order subsequence for one or more category ids. A miss is normal
//! output with exit code 0 — only catalog load failures and bad usage exit
//! nonzero.

use anyhow::{Context, Result, anyhow, bail};
use sqlref::{
    CatalogIndex, Category, TermName, render, render_all, render_summary, resolve_catalog_path,
    split_list, summarize_entries,
};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let catalog_path = resolve_catalog_path(cli.catalog)?;
    let index = CatalogIndex::load(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;

    let output = match cli.query {
        Query::Term(term) => render_term(&index, &term),
        Query::Categories(ids) => render_categories(&index, &ids),
        Query::Summary => {
            let mut text = String::new();
            let stats = summarize_entries(index.entries());
            render_summary(index.key(), &stats, &mut text)
                .map_err(|err| anyhow!("rendering summary: {err}"))?;
            text
        }
        Query::Everything => {
            let mut text = String::new();
            let stats = summarize_entries(index.entries());
            render_summary(index.key(), &stats, &mut text)
                .map_err(|err| anyhow!("rendering summary: {err}"))?;
            text.push('\n');
            text.push_str(&render_all(index.entries()));
            text
        }
    };

    print!("{}", output);
    Ok(())
}

fn render_term(index: &CatalogIndex, term: &str) -> String {
    let name = TermName(term.to_string());
    match index.entry(&name) {
        Some(entry) => render(entry),
        None => format!("no entry found for '{}'\n", term),
    }
}

fn render_categories(index: &CatalogIndex, ids: &[String]) -> String {
    let categories: Vec<Category> = ids.iter().map(|id| Category::from_str(id)).collect();
    let matches: Vec<_> = index
        .entries()
        .iter()
        .filter(|entry| categories.contains(&entry.category))
        .collect();
    if matches.is_empty() {
        return format!("no entries found for categories: {}\n", ids.join(", "));
    }
    render_all(matches)
}

enum Query {
    Term(String),
    Categories(Vec<String>),
    Summary,
    Everything,
}

struct Cli {
    query: Query,
    catalog: Option<PathBuf>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut term: Option<String> = None;
        let mut categories: Vec<String> = Vec::new();
        let mut summary = false;
        let mut catalog: Option<PathBuf> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--category" => {
                    let raw = next_value(&mut args, "--category")?;
                    let ids = split_list(&raw);
                    if ids.is_empty() {
                        bail!("--category requires at least one category id");
                    }
                    categories.extend(ids);
                }
                "--summary" => summary = true,
                "--catalog" => {
                    let path = next_value(&mut args, "--catalog")?;
                    if catalog.is_some() {
                        bail!("--catalog may only be provided once");
                    }
                    catalog = Some(PathBuf::from(path));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if other.starts_with('-') => bail!("unknown flag: {other}"),
                other => {
                    if term.is_some() {
                        bail!("only one term may be looked up per invocation");
                    }
                    term = Some(other.to_string());
                }
            }
        }

        let query = match (term, categories.is_empty(), summary) {
            (Some(_), _, true) | (Some(_), false, _) => {
                bail!("a term lookup cannot be combined with --category or --summary")
            }
            (None, false, true) => bail!("--summary cannot be combined with --category"),
            (Some(term), true, false) => Query::Term(term),
            (None, false, false) => Query::Categories(categories),
            (None, true, true) => Query::Summary,
            (None, true, false) => Query::Everything,
        };

        Ok(Cli { query, catalog })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: sqlref [TERM] [--category IDS] [--summary] [--catalog PATH]\n\
Looks up SQL reference entries by exact term name or category and renders them as text.\n\n\
Options:\n\
  TERM              Exact term name to look up (e.g. 'INNER JOIN'). A miss prints a notice and exits 0.\n\
  --category IDS    Comma- or space-delimited category ids (e.g. join,constraint).\n\
  --summary         Print only the catalog summary header.\n\
  --catalog PATH    Override the catalog file (or set SQLREF_CATALOG).\n\
  --help            Show this help text.\n"
}

fn print_usage() {
    print!("{}", usage());
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlref::{Entry, ReferenceCatalog};
    use std::path::Path;

    fn golden_index() -> CatalogIndex {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        CatalogIndex::load(&root.join("reference/sql_reference.json")).expect("bundled catalog")
    }

    #[test]
    fn term_miss_is_normal_output() {
        let index = golden_index();
        let output = render_term(&index, "NO SUCH TERM");
        assert_eq!(output, "no entry found for 'NO SUCH TERM'\n");
    }

    #[test]
    fn category_filter_preserves_document_order() {
        let index = golden_index();
        let output = render_categories(&index, &["join".to_string()]);
        let catalog: &ReferenceCatalog = index.catalog();
        let expected: Vec<&Entry> = catalog
            .entries
            .iter()
            .filter(|entry| entry.category.as_str() == "join")
            .collect();
        assert!(!expected.is_empty());
        let mut last_at = 0;
        for entry in expected {
            let at = output
                .find(&format!("== {} (", entry.name.as_str()))
                .expect("every join entry rendered");
            assert!(at >= last_at, "document order preserved");
            last_at = at;
        }
    }

    #[test]
    fn unknown_category_reports_empty_result() {
        let index = golden_index();
        let output = render_categories(&index, &["no_such_category".to_string()]);
        assert_eq!(output, "no entries found for categories: no_such_category\n");
    }
}
