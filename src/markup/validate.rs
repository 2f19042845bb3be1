//! Structural checks run on untrusted fragments before they are decoded.

use markup5ever_rcdom::Handle;

use super::dom;
use super::Fragment;
use crate::schema::{Field, FIELD_KEY_CLASS};

/// Whether every record table in `fragment` is well formed.
///
/// A record table is well formed when it has no more rows than there are schema fields and
/// every labelled row names a schema field. A container without record tables is valid.
pub fn is_valid(fragment: &Fragment) -> bool {
    let dom = dom::parse(fragment.as_str());
    let Some(container) = dom::find_first(&dom.document, "div") else {
        return false;
    };

    dom::find_all(&container, "table")
        .iter()
        .all(is_valid_record_table)
}

fn is_valid_record_table(table: &Handle) -> bool {
    let rows = dom::find_all(table, "tr");
    if rows.len() > Field::ALL.len() {
        return false;
    }
    rows.iter().all(|row| match key_cell(row) {
        Some(cell) => Field::lookup(dom::text_content(&cell).trim()).is_some(),
        None => true,
    })
}

pub(crate) fn key_cell(row: &Handle) -> Option<Handle> {
    dom::find_all(row, "td")
        .into_iter()
        .find(|cell| dom::has_class(cell, FIELD_KEY_CLASS))
}
