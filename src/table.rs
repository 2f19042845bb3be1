//! In-memory table model
//!
//!     A [`Table`] is an ordered list of [`Record`]s plus the ordered column set they share.
//!     Rows are built fresh for every operation; nothing here is persistent.
//!
//!     A record keeps its three kinds of values apart:
//!
//!     - schema values, keyed by [`Field`]. A missing key means the source never mentioned the
//!       field, a `None` value means it is known to be empty.
//!     - meta attributes, copied from the record table's own tag. They only get the `[meta]`
//!       prefix at the flat-file boundary.
//!     - extra columns, found in a flat file but neither schema nor meta. They are carried
//!       through to the flat output and never rendered into markup.
//!
//!     The position of a row is its index. Sorting reorders rows, which is what reassigns the
//!     dense zero-based index written to flat files.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::schema::{meta_column_name, Field};

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    Field(Field),
    Meta(String),
    Extra(String),
}

impl Column {
    /// Header name in the flat representation.
    pub fn flat_name(&self) -> String {
        match self {
            Column::Field(field) => field.as_str().to_string(),
            Column::Meta(name) => meta_column_name(name),
            Column::Extra(name) => name.clone(),
        }
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, Column::Field(_))
    }
}

/// One collective action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: BTreeMap<Field, Option<String>>,
    meta: BTreeMap<String, String>,
    extra: BTreeMap<String, Option<String>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for a present schema value.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Builder-style setter for a meta attribute.
    pub fn with_meta(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_meta(name, value);
        self
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        self.values.insert(field, value);
    }

    /// The value of `field`, or `None` when it is absent or null.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).and_then(|value| value.as_deref())
    }

    /// Whether `field` is a key of this record, null or not.
    pub fn has(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Schema values in display order.
    pub fn values(&self) -> impl Iterator<Item = (Field, Option<&str>)> {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.as_deref()))
    }

    pub fn meta(&self) -> &BTreeMap<String, String> {
        &self.meta
    }

    pub fn set_meta(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.meta.insert(name.into(), value.into());
    }

    pub fn extra(&self) -> &BTreeMap<String, Option<String>> {
        &self.extra
    }

    pub fn set_extra(&mut self, name: impl Into<String>, value: Option<String>) {
        self.extra.insert(name.into(), value);
    }

    /// Adds every missing schema field as a null value.
    pub fn complete(&mut self) {
        for field in Field::ALL {
            self.values.entry(field).or_insert(None);
        }
    }

    /// The value stored under `column`, flattened to an optional string.
    pub fn cell(&self, column: &Column) -> Option<&str> {
        match column {
            Column::Field(field) => self.get(*field),
            Column::Meta(name) => self.meta.get(name).map(String::as_str),
            Column::Extra(name) => self.extra.get(name).and_then(|value| value.as_deref()),
        }
    }

    fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        let fields = self.values.keys().map(|field| Column::Field(*field));
        let meta = self.meta.keys().map(|name| Column::Meta(name.clone()));
        let extra = self.extra.keys().map(|name| Column::Extra(name.clone()));
        fields.chain(meta).chain(extra)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (field, value) in self.values() {
            map.serialize_entry(field.as_str(), &value)?;
        }
        for (name, value) in &self.meta {
            map.serialize_entry(&meta_column_name(name), value)?;
        }
        for (name, value) in &self.extra {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Ordered rows sharing one column set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty table whose columns are the schema fields.
    pub fn with_schema() -> Self {
        Self {
            columns: Field::ALL.into_iter().map(Column::Field).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a table whose columns are exactly `columns`, plus any column a row introduces.
    pub fn from_parts(columns: Vec<Column>, rows: Vec<Record>) -> Self {
        let mut table = Self {
            columns,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            table.push(row);
        }
        table
    }

    pub fn from_records(rows: impl IntoIterator<Item = Record>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.push(row);
        }
        table
    }

    /// Appends a row, registering any column it introduces.
    pub fn push(&mut self, row: Record) {
        for column in row.columns() {
            if !self.columns.contains(&column) {
                self.columns.push(column);
            }
        }
        self.rows.push(row);
    }

    /// Concatenates tables in order, keeping the first-seen column order.
    pub fn merge(tables: impl IntoIterator<Item = Table>) -> Self {
        let mut merged = Self::new();
        for table in tables {
            for column in table.columns {
                if !merged.columns.contains(&column) {
                    merged.columns.push(column);
                }
            }
            for row in table.rows {
                merged.push(row);
            }
        }
        merged
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_column(&self, column: &Column) -> bool {
        self.columns.contains(column)
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<Column>, Vec<Record>) {
        (self.columns, self.rows)
    }

    pub(crate) fn set_parts(&mut self, columns: Vec<Column>, rows: Vec<Record>) {
        self.columns = columns;
        self.rows = rows;
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_registers_columns_in_first_seen_order() {
        let mut table = Table::new();
        table.push(Record::new().with(Field::Company, "Acme").with_meta("id", "a1"));
        table.push(Record::new().with(Field::Date, "2020-01-01"));

        assert_eq!(
            table.columns(),
            &[
                Column::Field(Field::Company),
                Column::Meta("id".into()),
                Column::Field(Field::Date),
            ]
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn complete_fills_missing_fields_with_null() {
        let mut record = Record::new().with(Field::Action, "strike");
        record.complete();

        assert!(Field::ALL.iter().all(|field| record.has(*field)));
        assert_eq!(record.get(Field::Action), Some("strike"));
        assert_eq!(record.get(Field::Date), None);
    }

    #[test]
    fn merge_preserves_source_order() {
        let first = Table::from_records([Record::new().with(Field::Company, "A")]);
        let second = Table::from_records([
            Record::new().with(Field::Company, "B"),
            Record::new().with(Field::Company, "C"),
        ]);

        let merged = Table::merge([first, second]);
        let companies: Vec<_> = merged
            .rows()
            .iter()
            .map(|row| row.get(Field::Company).unwrap())
            .collect();
        assert_eq!(companies, vec!["A", "B", "C"]);
    }

    #[test]
    fn serializes_schema_then_meta_then_extra() {
        let mut record = Record::new()
            .with(Field::Date, "2021-01-01")
            .with_meta("id", "x");
        record.set(Field::Source, None);
        record.set_extra("note", Some("n".into()));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2021-01-01","source":null,"[meta]id":"x","note":"n"}"#
        );
    }
}
