//! Conversion between container fragments and tables
//!
//! Decoding reads one record per record table; encoding renders one record table per row.
//! Both go through html5ever so escaping follows the HTML serializer, not ad hoc string
//! building.
//!
//! Field-specific rules:
//!
//! - `date`: cells hold `YYYY-MM-DD HH:MM:SS`, tables hold `YYYY-MM-DD`.
//! - `source`: cells hold escaped markup (usually an anchor) so that it shows up as literal
//!   text in the rendered document; tables hold the unescaped markup. Older cells carry a live
//!   anchor instead, which is read back with its attributes unescaped.
//! - everything else is carried as is.

use markup5ever_rcdom::{Handle, NodeData};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::dom;
use super::validate::key_cell;
use super::Fragment;
use crate::dates;
use crate::error::Result;
use crate::schema::{Field, FIELD_KEY_CLASS, FIELD_VALUE_CLASS, RESERVED_ATTRIBUTE};
use crate::table::{Record, Table};

const INDENT: &str = "  ";

static CHARACTER_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|([a-zA-Z]+));").unwrap()
});

/// Reads every record table of `fragment` into a table with one row per record table.
///
/// Callers holding untrusted input must check [`super::is_valid`] first; a label that is not
/// a schema field is reported as an error here rather than skipped.
pub fn decode(fragment: &Fragment) -> Result<Table> {
    let dom = dom::parse(fragment.as_str());
    let mut table = Table::with_schema();
    let Some(container) = dom::find_first(&dom.document, "div") else {
        return Ok(table);
    };

    for record_table in dom::find_all(&container, "table") {
        let mut record = Record::new();

        for (name, value) in dom::attributes(&record_table) {
            if name != RESERVED_ATTRIBUTE {
                record.set_meta(name, value);
            }
        }

        for row in dom::find_all(&record_table, "tr") {
            let (Some(key), Some(value)) = (key_cell(&row), value_cell(&row)) else {
                continue;
            };
            let field: Field = dom::text_content(&key).trim().parse()?;
            let raw = match field {
                Field::Source => source_markup(&value)?,
                _ => dom::inner_markup(&value)?,
            };
            record.set(field, decode_value(field, raw.trim())?);
        }

        record.complete();
        table.push(record);
    }

    Ok(table)
}

/// Renders `table` as a container with id `container_id`.
///
/// Empty and null values produce no row at all.
pub fn encode(table: &Table, container_id: &str) -> Result<Fragment> {
    let container = dom::create_element("div", vec![("id", container_id)]);

    for record in table.rows() {
        let attrs = record
            .meta()
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        let record_table = dom::create_element("table", attrs);

        for field in Field::ALL {
            let Some(value) = record.get(field).filter(|value| !value.is_empty()) else {
                continue;
            };

            let key = dom::create_element("td", vec![("class", FIELD_KEY_CLASS)]);
            dom::append(&key, dom::create_text(field.as_str()));
            let cell = dom::create_element("td", vec![("class", FIELD_VALUE_CLASS)]);
            dom::append(&cell, dom::create_text(&encode_value(field, value)?));

            let row = dom::create_element("tr", vec![]);
            append_indented(&row, key, 3);
            append_indented(&row, cell, 3);
            close_indented(&row, 2);
            append_indented(&record_table, row, 2);
        }

        close_indented(&record_table, 1);
        append_indented(&container, record_table, 1);
    }

    close_indented(&container, 0);
    Fragment::new(dom::serialize_node(&container)?)
}

fn value_cell(row: &Handle) -> Option<Handle> {
    dom::find_all(row, "td")
        .into_iter()
        .find(|cell| dom::has_class(cell, FIELD_VALUE_CLASS))
}

fn decode_value(field: Field, raw: &str) -> Result<Option<String>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let value = match field {
        Field::Date => dates::to_canonical(dates::parse_date(raw)?),
        _ => raw.to_string(),
    };
    Ok(Some(value))
}

fn encode_value(field: Field, value: &str) -> Result<String> {
    match field {
        Field::Date => Ok(dates::to_display(dates::parse_date(value)?)),
        // The text node is escaped on serialization.
        _ => Ok(value.to_string()),
    }
}

/// Markup held by a source cell.
///
/// Text nodes were already resolved by the parser and are taken as is. Element children are
/// serialized, which escapes them again, so only those are unescaped.
fn source_markup(cell: &Handle) -> Result<String> {
    let mut markup = String::new();
    for child in cell.children.borrow().iter() {
        match child.data {
            NodeData::Text { ref contents } => markup.push_str(&contents.borrow()),
            NodeData::Element { .. } => markup.push_str(&unescape(&dom::serialize_node(child)?)),
            _ => {}
        }
    }
    Ok(markup)
}

/// Resolves HTML character references; unknown names are left untouched.
fn unescape(text: &str) -> String {
    CHARACTER_REFERENCE
        .replace_all(text, |caps: &Captures| {
            let resolved = if let Some(decimal) = caps.get(1) {
                decimal.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
            } else {
                caps.get(3).and_then(|name| named_reference(name.as_str()))
            };
            match resolved {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn named_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

fn append_indented(parent: &Handle, child: Handle, depth: usize) {
    dom::append(parent, dom::create_text(&format!("\n{}", INDENT.repeat(depth))));
    dom::append(parent, child);
}

fn close_indented(parent: &Handle, depth: usize) {
    dom::append(parent, dom::create_text(&format!("\n{}", INDENT.repeat(depth))));
}
