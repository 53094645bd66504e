//! Entrypoint for the catalog validation gate.
//!
//! Runs the full load pipeline (schema validation, envelope checks, per-entry
//! checks) on one catalog file and proxies the verdict through the exit
//! status so CI and local workflows can rely on a single binary.

use anyhow::{Context, Result, anyhow, bail};
use sqlref::{CatalogIndex, resolve_catalog_path};
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
        .with_context(|| format!("validating catalog {}", catalog_path.display()))?;

    if !cli.quiet {
        println!(
            "catalog ok: {}, {} entries, {} categories",
            index.key().0,
            index.entries().len(),
            index.catalog().scope.categories.len()
        );
    }
    Ok(())
}

struct Cli {
    catalog: Option<PathBuf>,
    quiet: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalog: Option<PathBuf> = None;
        let mut quiet = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--catalog" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--catalog requires a value"))?;
                    catalog = Some(PathBuf::from(
                        value
                            .into_string()
                            .map_err(|_| anyhow!("--catalog must be valid UTF-8"))?,
                    ));
                }
                "--quiet" | "-q" => quiet = true,
                "--help" | "-h" => usage(0),
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(Self { catalog, quiet })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: catalog-check [--catalog PATH] [--quiet]\n\nOptions:\n  --catalog PATH   Validate this catalog file (or set SQLREF_CATALOG).\n  --quiet, -q      Suppress the success line; rely on the exit status.\n  --help           Show this help text."
    );
    std::process::exit(code);
}
