//! Finding and replacing the container inside a full document
//!
//!     The document is mostly Markdown, so it is never handed to an HTML parser as a whole.
//!     Instead the `<div>` tags are scanned with a regex and balanced by depth, which gives the
//!     exact byte span of every container. Replacing a container splices that span and leaves
//!     every other byte of the document untouched.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{DataError, Result};
use crate::markup::{is_valid, Fragment};

// Closing tags must be written exactly `</div>`.
static DIV_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(?:(/)div|div(\s[^>]*)?)>").unwrap());

static ID_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});

/// Extracts the unique container with id `container_id` from `doc`.
///
/// Fails with [`DataError::NotFound`] when there is none, [`DataError::MultipleFound`] when
/// there are several, and [`DataError::Malformed`] when the one found does not validate.
pub fn locate(doc: &str, container_id: &str) -> Result<Fragment> {
    let span = unique_span(doc, container_id)?;
    let fragment = Fragment::new(&doc[span.clone()])?;
    debug!(id = container_id, start = span.start, end = span.end, "located container");

    if !is_valid(&fragment) {
        return Err(DataError::Malformed {
            id: container_id.to_string(),
        });
    }
    Ok(fragment)
}

/// Returns `doc` with the container `container_id` replaced by `fragment`.
pub fn replace(doc: &str, container_id: &str, fragment: &Fragment) -> Result<String> {
    if !is_valid(fragment) {
        return Err(DataError::Malformed {
            id: container_id.to_string(),
        });
    }
    let span = unique_span(doc, container_id)?;

    let mut updated = String::with_capacity(doc.len() - span.len() + fragment.as_str().len());
    updated.push_str(&doc[..span.start]);
    updated.push_str(fragment.as_str());
    updated.push_str(&doc[span.end..]);
    Ok(updated)
}

fn unique_span(doc: &str, container_id: &str) -> Result<Range<usize>> {
    let mut spans = container_spans(doc, container_id);
    match spans.len() {
        0 => Err(DataError::NotFound {
            id: container_id.to_string(),
        }),
        1 => Ok(spans.remove(0)),
        count => Err(DataError::MultipleFound {
            id: container_id.to_string(),
            count,
        }),
    }
}

/// Byte spans of every balanced `<div>` whose `id` attribute is `container_id`.
fn container_spans(doc: &str, container_id: &str) -> Vec<Range<usize>> {
    let tags: Vec<_> = DIV_TAG.captures_iter(doc).collect();
    let mut spans = Vec::new();

    for (position, tag) in tags.iter().enumerate() {
        let is_closing = tag.get(1).is_some();
        let attributes = tag.get(2).map_or("", |m| m.as_str());
        if is_closing || id_of(attributes) != Some(container_id) {
            continue;
        }

        let start = tag.get(0).map_or(0, |m| m.start());
        let mut depth = 1usize;
        for later in &tags[position + 1..] {
            if later.get(1).is_none() {
                depth += 1;
            } else {
                depth -= 1;
            }
            if depth == 0 {
                let end = later.get(0).map_or(start, |m| m.end());
                spans.push(start..end);
                break;
            }
        }
    }

    spans
}

fn id_of(attributes: &str) -> Option<&str> {
    let caps = ID_ATTRIBUTE.captures(attributes)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
}
