//! Flat CSV representation of a table
//!
//! Layout: one header row, then one line per row. The first column is the row index with an
//! empty header name; the rest are the table's columns (schema fields, `[meta]<name>` columns,
//! extra columns). Null values are empty cells.

use std::io;

use crate::error::Result;
use crate::schema::{meta_attribute_name, Field};
use crate::table::{Column, Record, Table};

const INDEX_HEADERS: [&str; 2] = ["", "index"];

/// Writes `table` with an explicit index column.
pub fn write_table<W: io::Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec![String::new()];
    header.extend(table.columns().iter().map(Column::flat_name));
    csv.write_record(&header)?;

    for (index, row) in table.rows().iter().enumerate() {
        let mut line = vec![index.to_string()];
        line.extend(
            table
                .columns()
                .iter()
                .map(|column| row.cell(column).unwrap_or_default().to_string()),
        );
        csv.write_record(&line)?;
    }

    csv.flush()?;
    Ok(())
}

pub fn to_csv_string(table: &Table) -> Result<String> {
    let mut buffer = Vec::new();
    write_table(table, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Reads a table written by [`write_table`]. A leading index column is dropped.
///
/// Rows whose length differs from the header are an error.
pub fn read_table<R: io::Read>(reader: R) -> Result<Table> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv.headers()?.clone();

    let skip = usize::from(
        headers
            .get(0)
            .is_some_and(|name| INDEX_HEADERS.contains(&name.trim())),
    );
    let columns: Vec<Column> = headers.iter().skip(skip).map(column_for).collect();

    let mut rows = Vec::new();
    for line in csv.records() {
        let line = line?;
        let mut row = Record::new();
        for (column, value) in columns.iter().zip(line.iter().skip(skip)) {
            let value = (!value.is_empty()).then(|| value.to_string());
            match column {
                Column::Field(field) => row.set(*field, value),
                Column::Meta(name) => {
                    if let Some(value) = value {
                        row.set_meta(name.clone(), value);
                    }
                }
                Column::Extra(name) => row.set_extra(name.clone(), value),
            }
        }
        rows.push(row);
    }

    Ok(Table::from_parts(columns, rows))
}

pub fn from_csv_str(text: &str) -> Result<Table> {
    read_table(text.as_bytes())
}

fn column_for(name: &str) -> Column {
    if let Some(field) = Field::lookup(name) {
        Column::Field(field)
    } else if let Some(attribute) = meta_attribute_name(name) {
        Column::Meta(attribute.to_string())
    } else {
        Column::Extra(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::canonicalize;
    use crate::error::DataError;

    fn sample() -> Table {
        canonicalize(Table::from_records([
            Record::new()
                .with(Field::Date, "2021-05-05")
                .with(Field::Company, "Globex")
                .with(Field::Description, "Walkout, day one"),
            Record::new()
                .with(Field::Date, "2022-01-01")
                .with(Field::Source, "<a href=\"https://example.com\">post</a>")
                .with(Field::Company, "Acme")
                .with(Field::Action, "strike")
                .with_meta("id", "a1"),
        ]))
        .unwrap()
    }

    #[test]
    fn writes_index_and_columns() {
        let csv = to_csv_string(&sample()).unwrap();
        insta::assert_snapshot!(csv, @r###"
        ,date,source,company,action,employment_type,union_affiliation,worker_count,description,[meta]id
        0,2022-01-01,"<a href=""https://example.com"">post</a>",Acme,strike,,,,,a1
        1,2021-05-05,,Globex,,,,,"Walkout, day one",
        "###);
    }

    #[test]
    fn reads_what_it_writes() {
        let table = sample();
        let read = from_csv_str(&to_csv_string(&table).unwrap()).unwrap();
        assert_eq!(read, table);
    }

    #[test]
    fn keeps_extra_columns() {
        let read = from_csv_str("index,date,notes\n0,2020-01-01,checked\n").unwrap();
        assert_eq!(
            read.columns(),
            &[Column::Field(Field::Date), Column::Extra("notes".into())]
        );
        assert_eq!(
            read.rows()[0].extra().get("notes"),
            Some(&Some("checked".to_string()))
        );
    }

    #[test]
    fn header_without_index_is_read_as_is() {
        let read = from_csv_str("date,company\n2020-01-01,Acme\n").unwrap();
        assert_eq!(read.rows()[0].get(Field::Company), Some("Acme"));
    }

    #[test]
    fn ragged_rows_are_errors() {
        let err = from_csv_str(",date,company\n0,2020-01-01\n").unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }
}
