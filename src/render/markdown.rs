//! Markdown documents: one per table plus a linked index.

use super::sections;
use crate::client::DetailLevel;
use crate::convert::Converter;
use crate::locale::Locale;
use crate::model::Table;
use std::fmt::Write;
use tabled::builder::Builder;
use tabled::settings::Style;

/// File name of the document describing `table`.
///
/// Quoted identifiers may contain path separators; they are percent-escaped so
/// every document stays directly inside the output directory.
pub fn file_name(table: &Table) -> String {
    let mut name = String::with_capacity(table.name.len() + 3);
    for c in table.name.chars() {
        match c {
            '%' => name.push_str("%25"),
            '/' => name.push_str("%2F"),
            '\\' => name.push_str("%5C"),
            c => name.push(c),
        }
    }
    name.push_str(".md");
    name
}

/// Relative link target of the document describing `table`.
fn link_target(table: &Table) -> String {
    file_name(table).replace('%', "%25").replace(' ', "%20")
}

pub fn table_document(table: &Table, converter: Converter, locale: Locale) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", table.name);
    if !table.comment.is_empty() {
        let _ = writeln!(out, "\n{}", table.comment);
    }

    for section in sections(table, converter, locale, DetailLevel::All) {
        let _ = writeln!(out, "\n## {}\n", section.title);
        write_table(&mut out, &section.header, &section.rows);
    }
    out
}

pub fn index_document(tables: &[Table], locale: Locale) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", locale.t("table_list", "title"));

    let header = [locale.t("table_list", "table"), locale.t("table_list", "comment")];
    let rows: Vec<[String; 2]> = tables
        .iter()
        .map(|t| [format!("[{}]({})", t.name, link_target(t)), t.comment.clone()])
        .collect();
    write_table(&mut out, &header, &rows);
    out
}

pub fn write_table<R: AsRef<[String]>>(out: &mut String, header: &[&str], rows: &[R]) {
    let mut builder = Builder::default();
    builder.push_record(header.iter().map(|h| escape(h)));
    for row in rows {
        builder.push_record(row.as_ref().iter().map(|c| escape(c)));
    }
    let _ = writeln!(out, "{}", builder.build().with(Style::markdown()));
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}
