//! The fixed record schema and the reserved names of the markup layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Id of the container holding the dataset in the project README.
pub const PROJECT_ID: &str = "collective-actions-in-tech";

/// Prefix marking a container-level attribute in the flat representation.
pub const META_PREFIX: &str = "[meta]";

/// Class of the cell holding the field name.
pub const FIELD_KEY_CLASS: &str = "field-key";

/// Class of the cell holding the field value.
pub const FIELD_VALUE_CLASS: &str = "field-value";

/// Record table attribute that is never carried as meta.
pub const RESERVED_ATTRIBUTE: &str = "class";

/// Display format of dates inside value cells.
pub const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Canonical date format in tables and flat files.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One of the eight schema fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Date,
    Source,
    Company,
    Action,
    EmploymentType,
    UnionAffiliation,
    WorkerCount,
    Description,
}

impl Field {
    /// All schema fields in display order.
    pub const ALL: [Field; 8] = [
        Field::Date,
        Field::Source,
        Field::Company,
        Field::Action,
        Field::EmploymentType,
        Field::UnionAffiliation,
        Field::WorkerCount,
        Field::Description,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Source => "source",
            Field::Company => "company",
            Field::Action => "action",
            Field::EmploymentType => "employment_type",
            Field::UnionAffiliation => "union_affiliation",
            Field::WorkerCount => "worker_count",
            Field::Description => "description",
        }
    }

    /// Returns the field with this exact name, if any.
    pub fn lookup(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::lookup(s).ok_or_else(|| DataError::UnknownField(s.to_string()))
    }
}

/// Flat column name for a meta attribute.
pub fn meta_column_name(attribute: &str) -> String {
    format!("{META_PREFIX}{attribute}")
}

/// Bare attribute name for a flat meta column, or `None` if the column is not a meta column.
pub fn meta_attribute_name(column: &str) -> Option<&str> {
    column.strip_prefix(META_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_display_order() {
        let names: Vec<_> = Field::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "date",
                "source",
                "company",
                "action",
                "employment_type",
                "union_affiliation",
                "worker_count",
                "description"
            ]
        );
    }

    #[test]
    fn parses_known_names_only() {
        assert_eq!("worker_count".parse::<Field>().unwrap(), Field::WorkerCount);
        assert!(matches!(
            "Date".parse::<Field>(),
            Err(DataError::UnknownField(name)) if name == "Date"
        ));
    }

    #[test]
    fn meta_names_round_trip() {
        let column = meta_column_name("id");
        assert_eq!(column, "[meta]id");
        assert_eq!(meta_attribute_name(&column), Some("id"));
        assert_eq!(meta_attribute_name("date"), None);
    }
}
