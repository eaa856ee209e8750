//! PostgreSQL type aliases and serial column detection.

use super::ColumnRow;
use crate::model::Column;

/// NAMEDATALEN - 1
const MAX_IDENTIFIER_LENGTH: usize = 63;
/// Length budget of each name part once the sequence name must be clipped.
const PART_THRESHOLD: usize = 29;
/// `_` between table and column plus the `_seq` suffix.
const SEQUENCE_DECORATION: usize = 5;

/// Rewrite type, size and default of a default column row.
pub(super) fn prettify(col: &Column, mut row: ColumnRow) -> ColumnRow {
    let serial = match col.data_type.as_str() {
        "int2" => Some(("smallserial", "smallint")),
        "int4" => Some(("serial", "integer")),
        "int8" => Some(("bigserial", "bigint")),
        _ => None,
    };

    if let Some((serial_name, plain_name)) = serial {
        if is_serial(col) {
            row[2] = serial_name.to_string();
            row[5].clear();
        } else {
            row[2] = plain_name.to_string();
        }
        row[3].clear();
        return row;
    }

    match col.data_type.as_str() {
        "float4" => {
            row[2] = "real".to_string();
            row[3].clear();
        }
        "float8" => {
            row[2] = "double precision".to_string();
            row[3].clear();
        }
        _ => {}
    }
    row
}

/// Name PostgreSQL gives the implicit sequence of a serial column.
pub fn sequence_name(table: &str, column: &str) -> String {
    let (mut table, mut column) = (table, column);
    if table.len() + column.len() + SEQUENCE_DECORATION > MAX_IDENTIFIER_LENGTH {
        if table.len() > PART_THRESHOLD {
            if column.len() > PART_THRESHOLD {
                table = clip(table, PART_THRESHOLD);
                column = clip(column, PART_THRESHOLD);
            } else {
                table = clip(table, PART_THRESHOLD * 2 - column.len());
            }
        } else {
            column = clip(column, PART_THRESHOLD * 2 - table.len());
        }
    }
    format!("{table}_{column}_seq")
}

/// Whether the column default is the `nextval` of its own implicit sequence.
pub fn is_serial(col: &Column) -> bool {
    let seq = sequence_name(&col.table_name, &col.name);
    col.default_value == format!("nextval('{seq}'::regclass)")
}

/// First `max` bytes of `s`, backing off to a character boundary.
fn clip(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
