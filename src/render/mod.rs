//! Rendering of converted rows as console tables or Markdown documents.

pub mod console;
pub mod markdown;

use crate::client::DetailLevel;
use crate::convert::Converter;
use crate::locale::Locale;
use crate::model::Table;

/// One titled block of a table definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub category: &'static str,
    pub title: &'static str,
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

const COLUMN_KEYS: &[&str] = &[
    "primary_key",
    "name",
    "data_type",
    "size",
    "null",
    "default_value",
    "comment",
];
const INDEX_KEYS: &[&str] = &["name", "columns", "unique"];
const CONSTRAINT_KEYS: &[&str] = &["name", "kind", "content"];
const FOREIGN_KEY_KEYS: &[&str] = &["name", "columns", "foreign_table", "foreign_columns"];
const REFERENCED_KEY_KEYS: &[&str] = &["name", "source_table", "source_columns", "columns"];

impl Section {
    fn new(category: &'static str, keys: &[&str], rows: Vec<Vec<String>>, locale: Locale) -> Self {
        Self {
            category,
            title: locale.t(category, "title"),
            header: keys.iter().map(|k| locale.t(category, k)).collect(),
            rows,
        }
    }
}

/// Sections of `table` in display order.
///
/// The column section is always present. With [`DetailLevel::All`] the other
/// categories follow, each only when it has at least one row.
pub fn sections(
    table: &Table,
    converter: Converter,
    locale: Locale,
    detail: DetailLevel,
) -> Vec<Section> {
    let columns = table
        .columns
        .iter()
        .map(|c| converter.convert_column(c).to_vec())
        .collect();
    let mut out = vec![Section::new("column", COLUMN_KEYS, columns, locale)];

    if detail == DetailLevel::Columns {
        return out;
    }

    let optional = [
        (
            "index",
            INDEX_KEYS,
            table.indices.iter().map(|i| converter.convert_index(i).to_vec()).collect::<Vec<_>>(),
        ),
        (
            "constraint",
            CONSTRAINT_KEYS,
            table
                .constraints
                .iter()
                .map(|c| converter.convert_constraint(c).to_vec())
                .collect(),
        ),
        (
            "foreign_key",
            FOREIGN_KEY_KEYS,
            table
                .foreign_keys
                .iter()
                .map(|fk| converter.convert_foreign_key(fk).to_vec())
                .collect(),
        ),
        (
            "referenced_key",
            REFERENCED_KEY_KEYS,
            table
                .referenced_keys
                .iter()
                .map(|rk| converter.convert_referenced_key(rk).to_vec())
                .collect(),
        ),
    ];

    for (category, keys, rows) in optional {
        if !rows.is_empty() {
            out.push(Section::new(category, keys, rows, locale));
        }
    }
    out
}
