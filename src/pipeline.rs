//! End-to-end operations
//!
//!     Each operation reads whole texts, transforms them in memory and writes at most one file
//!     at the very end. A failure anywhere before the write leaves every file untouched; the
//!     write itself goes through a temporary file in the destination directory that is renamed
//!     over the target.
//!
//!     Text-level operations (`*_text`, `build_*`, `render_*`) never touch the filesystem and
//!     are what the file-level operations are built from.

use std::fs;
use std::io::Write;
use std::iter;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::canonical::canonicalize;
use crate::document;
use crate::error::{DataError, Result};
use crate::flat;
use crate::markup::{self, Fragment};
use crate::sources::{Source, SourceProvider};
use crate::table::Table;

/// Decodes every source, merges them in order and canonicalizes the result.
///
/// No sources at all give an empty table with the schema columns.
pub fn build_table_from_sources(sources: &[Source]) -> Result<Table> {
    let mut tables = Vec::with_capacity(sources.len());
    for source in sources {
        let fragment = Fragment::new(source.text.trim())?;
        if !markup::is_valid(&fragment) {
            return Err(DataError::Malformed {
                id: source.origin.clone(),
            });
        }
        let table = markup::decode(&fragment)?;
        debug!(origin = %source.origin, rows = table.len(), "decoded source");
        tables.push(table);
    }
    canonicalize(Table::merge(iter::once(Table::with_schema()).chain(tables)))
}

/// Reads a flat CSV table and canonicalizes it.
pub fn build_table_from_flat_store(csv_text: &str) -> Result<Table> {
    canonicalize(flat::from_csv_str(csv_text)?)
}

/// Replaces the container `container_id` of `doc` with the canonical rendering of `table`.
///
/// The existing container must be present and valid.
pub fn render_table_into_document(table: Table, doc: &str, container_id: &str) -> Result<String> {
    let table = canonicalize(table)?;
    let fragment = markup::encode(&table, container_id)?;
    document::locate(doc, container_id)?;
    document::replace(doc, container_id, &fragment)
}

/// Writes `table` as CSV, index column included.
pub fn persist_table(table: &Table, path: &Path) -> Result<()> {
    let csv = flat::to_csv_string(table)?;
    write_atomically(path, csv.as_bytes())
}

/// The canonical table held by the container `container_id` of `doc`.
pub fn table_from_document_text(doc: &str, container_id: &str) -> Result<Table> {
    let fragment = document::locate(doc, container_id)?;
    let table = canonicalize(markup::decode(&fragment)?)?;
    debug!(id = container_id, rows = table.len(), "read table from document");
    Ok(table)
}

/// `doc` with its container rewritten in canonical form.
pub fn clean_document_text(doc: &str, container_id: &str) -> Result<String> {
    let table = table_from_document_text(doc, container_id)?;
    render_table_into_document(table, doc, container_id)
}

/// Saves the table of the document at `input` as CSV at `output`.
pub fn save_document_table_to_csv(input: &Path, output: &Path, container_id: &str) -> Result<()> {
    let table = table_from_document(input, container_id)?;
    persist_table(&table, output)
}

pub fn table_from_document(input: &Path, container_id: &str) -> Result<Table> {
    let doc = fs::read_to_string(input)?;
    table_from_document_text(&doc, container_id)
}

/// Rewrites the document at `input` with its table in canonical form.
pub fn clean_document(input: &Path, container_id: &str) -> Result<()> {
    let doc = fs::read_to_string(input)?;
    let cleaned = clean_document_text(&doc, container_id)?;
    write_atomically(input, cleaned.as_bytes())
}

pub fn table_from_provider(provider: &dyn SourceProvider) -> Result<Table> {
    build_table_from_sources(&provider.sources()?)
}

pub fn table_from_csv_file(path: &Path) -> Result<Table> {
    build_table_from_flat_store(&fs::read_to_string(path)?)
}

/// Renders `table` into the document at `path`, replacing its container `container_id`.
pub fn save_table_to_document(table: Table, path: &Path, container_id: &str) -> Result<()> {
    let doc = fs::read_to_string(path)?;
    let updated = render_table_into_document(table, &doc, container_id)?;
    write_atomically(path, updated.as_bytes())
}

fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.persist(path)?;
    info!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
