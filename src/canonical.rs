//! Canonical form of a table: complete field sets, newest first
//!
//! Every output path (flat file, re-rendered markup, in-memory consumers) goes through
//! [`canonicalize`], so there is exactly one row order in the system.

use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::dates;
use crate::error::{DataError, Result};
use crate::schema::Field;
use crate::table::{Column, Record, Table};

/// [`sort`] then [`complete`]. A table without a date column is rejected before any field
/// gets filled in.
pub fn canonicalize(table: Table) -> Result<Table> {
    Ok(complete(sort(table)?))
}

/// Gives every row every schema field and puts the schema columns first, in display order.
pub fn complete(mut table: Table) -> Table {
    let (columns, mut rows) = std::mem::take(&mut table).into_parts();
    for row in &mut rows {
        row.complete();
    }

    let mut ordered: Vec<Column> = Field::ALL.into_iter().map(Column::Field).collect();
    ordered.extend(columns.into_iter().filter(|column| !column.is_schema()));

    table.set_parts(ordered, rows);
    table
}

/// Orders rows by date, newest first; ties keep their input order and null dates go last.
///
/// Dates are normalized to `YYYY-MM-DD` on the way. Sorting a sorted table changes nothing.
pub fn sort(mut table: Table) -> Result<Table> {
    if !table.has_column(&Column::Field(Field::Date)) {
        return Err(DataError::MissingDateColumn);
    }

    let (columns, rows) = std::mem::take(&mut table).into_parts();
    let mut keyed = rows
        .into_iter()
        .map(|row| Ok((date_of(&row)?, row)))
        .collect::<Result<Vec<(Option<NaiveDate>, Record)>>>()?;

    // `sort_by_key` is stable.
    keyed.sort_by_key(|(date, _)| (date.is_none(), Reverse(*date)));

    let rows = keyed
        .into_iter()
        .map(|(date, mut row)| {
            if let Some(date) = date {
                row.set(Field::Date, Some(dates::to_canonical(date)));
            }
            row
        })
        .collect();

    table.set_parts(columns, rows);
    Ok(table)
}

fn date_of(row: &Record) -> Result<Option<NaiveDate>> {
    row.get(Field::Date)
        .filter(|value| !value.trim().is_empty())
        .map(dates::parse_date)
        .transpose()
}
