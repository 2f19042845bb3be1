//! Markup side of the table: the container fragment embedded in a document
//!
//! # Layout
//!
//! | Table concept | Markup | Notes |
//! |---------------|--------|-------|
//! | Container | `<div id="…">` | one per dataset, id is the project identifier |
//! | Record | `<table>` | non-`class` attributes are the record's meta attributes |
//! | Schema value | `<tr>` | one `td.field-key` cell and one `td.field-value` cell |
//!
//! Values that are empty are not rendered at all, so decoding a rendered table yields `None`
//! for them even when the record held an empty string. Downstream readers rely on the
//! omission, so the asymmetry stays.

pub mod codec;
pub mod dom;
pub mod validate;

use std::fmt;

use crate::error::{DataError, Result};

pub use codec::{decode, encode};
pub use validate::is_valid;

const OPENING: &str = "<div";
const CLOSING: &str = "</div>";

/// Markup text that starts with a container opening tag and ends with its closing tag.
///
/// Construction checks only those bounds; structural checks are [`is_valid`]'s job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.starts_with(OPENING) && text.ends_with(CLOSING) {
            Ok(Self(text))
        } else {
            Err(DataError::NotAContainer)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
