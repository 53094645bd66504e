//! Text rendering for catalog entries.
//!
//! The renderer intentionally stays text-only so it can sit in pipelines.
//! Output is deterministic and line-oriented: each entry becomes a labeled
//! block whose name, category, and description can be recovered with
//! [`parse_rendered`]. Example snippets are clipped for display and are not
//! part of the round-trip contract.

use crate::catalog::{CatalogKey, Category, Entry};
use std::collections::BTreeMap;
use std::fmt;

const MAX_EXAMPLE_LINES: usize = 8;
const MAX_EXAMPLE_CHARS: usize = 120;

/// Render one entry into the provided writer.
pub fn render_entry(entry: &Entry, writer: &mut impl fmt::Write) -> fmt::Result {
    writeln!(
        writer,
        "== {} ({}) ==",
        entry.name.as_str(),
        entry.category.as_str()
    )?;
    writeln!(writer, "  description: {}", entry.description)?;
    write_example(writer, &entry.example)?;
    if !entry.see_also.is_empty() {
        let names = entry
            .see_also
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(writer, "  see also: {}", names)?;
    }
    if let Some(note) = entry.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        writeln!(writer, "  note: {}", note)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Deterministic text form of one entry.
pub fn render(entry: &Entry) -> String {
    let mut output = String::new();
    render_entry(entry, &mut output).expect("writing to a String cannot fail");
    output
}

/// Concatenation of [`render`] over a sequence, preserving order.
pub fn render_all<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> String {
    let mut output = String::new();
    for entry in entries {
        render_entry(entry, &mut output).expect("writing to a String cannot fail");
    }
    output
}

#[derive(Debug, Default)]
/// Aggregate counts over a set of entries.
pub struct CatalogStats {
    pub total_entries: usize,
    pub categories: BTreeMap<String, usize>,
}

/// Count entries per category.
pub fn summarize_entries<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> CatalogStats {
    let mut stats = CatalogStats::default();
    for entry in entries {
        stats.total_entries += 1;
        *stats
            .categories
            .entry(entry.category.as_str().to_string())
            .or_insert(0) += 1;
    }
    stats
}

/// Render the summary header for a catalog edition.
pub fn render_summary(
    key: &CatalogKey,
    stats: &CatalogStats,
    writer: &mut impl fmt::Write,
) -> fmt::Result {
    writeln!(writer, "sql reference summary")?;
    writeln!(writer, "==========================")?;
    writeln!(writer, "catalog       : {}", key.0)?;
    writeln!(writer, "total entries : {}", stats.total_entries)?;
    writeln!(
        writer,
        "categories    : {}",
        format_counts(&stats.categories, "none")
    )?;
    Ok(())
}

fn write_example(writer: &mut impl fmt::Write, example: &str) -> fmt::Result {
    let trimmed = example.trim_end();
    if trimmed.is_empty() {
        return Ok(());
    }

    writeln!(writer, "  example:")?;
    let mut lines = trimmed.lines();
    for _ in 0..MAX_EXAMPLE_LINES {
        match lines.next() {
            Some(line) => writeln!(writer, "    {}", truncate_line(line))?,
            None => return Ok(()),
        }
    }

    if lines.next().is_some() {
        writeln!(writer, "    …")?;
    }
    Ok(())
}

fn truncate_line(line: &str) -> String {
    let clean = line.trim_end();
    if clean.chars().count() <= MAX_EXAMPLE_CHARS {
        return clean.to_string();
    }
    let mut shortened = String::with_capacity(MAX_EXAMPLE_CHARS + 1);
    for (idx, ch) in clean.chars().enumerate() {
        if idx >= MAX_EXAMPLE_CHARS - 1 {
            shortened.push('…');
            break;
        }
        shortened.push(ch);
    }
    shortened
}

fn format_counts(map: &BTreeMap<String, usize>, empty_label: &str) -> String {
    if map.is_empty() {
        return empty_label.to_string();
    }
    map.iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Name, category, and description recovered from rendered text.
pub struct RenderedEntry {
    pub name: String,
    pub category: Category,
    pub description: String,
}

/// Errors that can occur while re-parsing rendered entry blocks.
#[derive(Debug)]
pub enum RenderedParseError {
    /// An entry header line did not match `== NAME (category) ==`.
    Header { line: usize },
    /// A description line appeared before any entry header.
    StrayDescription { line: usize },
    /// An entry block ended without a description line.
    MissingDescription { line: usize, name: String },
}

impl fmt::Display for RenderedParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedParseError::Header { line } => {
                write!(f, "line {line}: malformed entry header")
            }
            RenderedParseError::StrayDescription { line } => {
                write!(f, "line {line}: description outside an entry block")
            }
            RenderedParseError::MissingDescription { line, name } => {
                write!(f, "line {line}: entry '{name}' has no description line")
            }
        }
    }
}

impl std::error::Error for RenderedParseError {}

/// Re-parse rendered entry blocks back into their identifying fields.
///
/// Header and description lines are significant; example blocks, cross
/// references, and summary headers are skipped. Errors carry the 1-based line
/// number where parsing failed to simplify diagnostics for callers.
pub fn parse_rendered(text: &str) -> Result<Vec<RenderedEntry>, RenderedParseError> {
    struct Partial {
        line: usize,
        name: String,
        category: Category,
        description: Option<String>,
    }

    fn finalize(partial: Partial) -> Result<RenderedEntry, RenderedParseError> {
        let Partial {
            line,
            name,
            category,
            description,
        } = partial;
        match description {
            Some(description) => Ok(RenderedEntry {
                name,
                category,
                description,
            }),
            None => Err(RenderedParseError::MissingDescription { line, name }),
        }
    }

    let mut entries = Vec::new();
    let mut current: Option<Partial> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw_line.trim();
        if line.starts_with("== ") {
            let header = line
                .strip_prefix("== ")
                .and_then(|rest| rest.strip_suffix(" =="))
                .ok_or(RenderedParseError::Header { line: line_number })?;
            let (name, category) = split_header(header)
                .ok_or(RenderedParseError::Header { line: line_number })?;
            if let Some(previous) = current.take() {
                entries.push(finalize(previous)?);
            }
            current = Some(Partial {
                line: line_number,
                name: name.to_string(),
                category: Category::from_str(category),
                description: None,
            });
        } else if let Some(rest) = line.strip_prefix("description: ") {
            match current.as_mut() {
                Some(partial) => partial.description = Some(rest.to_string()),
                None => return Err(RenderedParseError::StrayDescription { line: line_number }),
            }
        }
    }

    if let Some(last) = current.take() {
        entries.push(finalize(last)?);
    }

    Ok(entries)
}

fn split_header(header: &str) -> Option<(&str, &str)> {
    let (name, rest) = header.rsplit_once(" (")?;
    let category = rest.strip_suffix(')')?;
    if name.is_empty() || category.is_empty() {
        return None;
    }
    Some((name, category))
}
