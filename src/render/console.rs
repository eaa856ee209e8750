//! Bordered ASCII tables for terminal output.

use super::sections;
use crate::client::DetailLevel;
use crate::convert::Converter;
use crate::locale::Locale;
use crate::model::Table;
use std::fmt::Write;
use tabled::builder::Builder;
use tabled::settings::Alignment;
use tabled::settings::object::Rows;
use tabled::settings::style::{HorizontalLine, Style};

/// Definition of one table, columns first.
pub fn render_table(
    table: &Table,
    converter: Converter,
    locale: Locale,
    detail: DetailLevel,
) -> String {
    let mut out = String::new();
    for (i, section) in sections(table, converter, locale, detail).iter().enumerate() {
        if i > 0 {
            out.push('\n');
            let _ = writeln!(out, "### {}", section.title);
        }
        write_table(&mut out, &section.header, &section.rows);
    }
    out
}

/// Bordered grid with one rule under the header.
pub fn write_table<R: AsRef<[String]>>(out: &mut String, header: &[&str], rows: &[R]) {
    let mut builder = Builder::default();
    builder.push_record(header.iter().copied());
    for row in rows {
        builder.push_record(row.as_ref().iter().map(|c| flatten(c)));
    }

    let mut grid = builder.build();
    grid.with(
        Style::ascii()
            .remove_horizontal()
            .horizontals([(1, HorizontalLine::full('-', '+', '+', '+'))]),
    );
    grid.modify(Rows::first(), Alignment::center());
    for (i, row) in rows.iter().enumerate() {
        for (j, cell) in row.as_ref().iter().enumerate() {
            if is_numeric(cell) {
                grid.modify((i + 1, j), Alignment::right());
            }
        }
    }

    let _ = writeln!(out, "{grid}");
}

/// Numbers are right aligned, everything else left aligned.
fn is_numeric(cell: &str) -> bool {
    let cell = cell.trim();
    cell.bytes().any(|b| b.is_ascii_digit()) && cell.parse::<f64>().is_ok()
}

/// Multi-line values would break the grid.
fn flatten(cell: &str) -> String {
    cell.replace(['\r', '\n'], " ")
}

/// Borderless `name  comment` lines, one per table.
pub fn table_names(tables: &[Table], with_comment: bool) -> Vec<String> {
    if tables.is_empty() {
        return Vec::new();
    }

    let mut builder = Builder::default();
    for t in tables {
        if with_comment {
            builder.push_record([t.name.clone(), flatten(&t.comment)]);
        } else {
            builder.push_record([t.name.clone()]);
        }
    }
    let listing = builder.build().with(Style::empty()).to_string();

    listing.lines().map(|line| line.trim().to_string()).collect()
}
