//! Conversion of schema entities into display rows.
//!
//! Every row has a fixed cell order:
//!
//! | entity         | cells                                                   |
//! |----------------|---------------------------------------------------------|
//! | column         | pk, name, type, size, null, default, comment            |
//! | index          | name, columns, unique                                   |
//! | constraint     | name, kind, content                                     |
//! | foreign key    | name, columns, foreign table, foreign columns           |
//! | referenced key | name, source table, source columns, columns             |

mod postgres;

pub use postgres::{is_serial, sequence_name};

use crate::model::{Column, Constraint, ForeignKey, Index};

pub type ColumnRow = [String; 7];
pub type IndexRow = [String; 3];
pub type ConstraintRow = [String; 3];
pub type ForeignKeyRow = [String; 4];
pub type ReferencedKeyRow = [String; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Converter {
    /// Driver agnostic, data type names as reported by the database.
    #[default]
    Default,
    /// PostgreSQL aliases (`integer`, `serial`, ...) instead of internal names.
    PostgresPretty,
}

impl Converter {
    pub fn find(pretty: bool, driver: &str) -> Self {
        match (pretty, driver) {
            (true, "postgres") => Self::PostgresPretty,
            _ => Self::Default,
        }
    }

    pub fn convert_column(self, col: &Column) -> ColumnRow {
        let row = default_column(col);
        match self {
            Self::Default => row,
            Self::PostgresPretty => postgres::prettify(col, row),
        }
    }

    pub fn convert_index(self, idx: &Index) -> IndexRow {
        let cols: Vec<&str> = idx.columns.iter().map(|c| c.name.as_str()).collect();
        let unique = if idx.unique { "YES" } else { "" };
        [idx.name.clone(), cols.join(", "), unique.to_string()]
    }

    pub fn convert_constraint(self, con: &Constraint) -> ConstraintRow {
        [con.name.clone(), con.kind.clone(), con.content.clone()]
    }

    pub fn convert_foreign_key(self, fk: &ForeignKey) -> ForeignKeyRow {
        let (from_cols, to_cols) = joined_columns(fk);
        let table = fk
            .column_references
            .first()
            .map(|r| qualified_name(&r.to, &r.from))
            .unwrap_or_default();
        [fk.name.clone(), from_cols, table, to_cols]
    }

    pub fn convert_referenced_key(self, fk: &ForeignKey) -> ReferencedKeyRow {
        let (from_cols, to_cols) = joined_columns(fk);
        let table = fk
            .column_references
            .first()
            .map(|r| qualified_name(&r.from, &r.to))
            .unwrap_or_default();
        [fk.name.clone(), table, from_cols, to_cols]
    }
}

fn default_column(col: &Column) -> ColumnRow {
    let pk_position = if col.primary_key_position > 0 {
        col.primary_key_position.to_string()
    } else {
        String::new()
    };
    let null = if col.nullable { "" } else { "NO" };
    [
        pk_position,
        col.name.clone(),
        col.data_type.clone(),
        col.size.to_string(),
        null.to_string(),
        col.default_value.clone(),
        col.comment.clone(),
    ]
}

fn joined_columns(fk: &ForeignKey) -> (String, String) {
    let from: Vec<&str> = fk.column_references.iter().map(|r| r.from.name.as_str()).collect();
    let to: Vec<&str> = fk.column_references.iter().map(|r| r.to.name.as_str()).collect();
    (from.join(", "), to.join(", "))
}

/// Table name of `col`, schema-qualified when it lives outside `anchor`'s schema.
fn qualified_name(col: &Column, anchor: &Column) -> String {
    if col.schema == anchor.schema {
        col.table_name.clone()
    } else {
        format!("{}.{}", col.schema, col.table_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnReference, Size};

    fn column(name: &str, nullable: bool, pk: i64) -> Column {
        Column {
            schema: "public".to_string(),
            table_name: "items".to_string(),
            name: name.to_string(),
            comment: "comment".to_string(),
            data_type: "varchar".to_string(),
            size: Size::length(50),
            nullable,
            default_value: "'none'::character varying".to_string(),
            primary_key_position: pk,
        }
    }

    fn reference(from: (&str, &str, &str), to: (&str, &str, &str)) -> ColumnReference {
        ColumnReference {
            from: Column::reference(from.0, from.1, from.2),
            to: Column::reference(to.0, to.1, to.2),
        }
    }

    #[test]
    fn test_find_converter() {
        assert_eq!(Converter::find(false, "postgres"), Converter::Default);
        assert_eq!(Converter::find(true, "postgres"), Converter::PostgresPretty);
        assert_eq!(Converter::find(true, "mysql"), Converter::Default);
        assert_eq!(Converter::find(false, "unknown"), Converter::Default);
    }

    #[test]
    fn test_convert_column() {
        let row = Converter::Default.convert_column(&column("name", false, 0));
        assert_eq!(
            row,
            [
                "",
                "name",
                "varchar",
                "50",
                "NO",
                "'none'::character varying",
                "comment"
            ]
        );
    }

    #[test]
    fn test_convert_column_null_polarity() {
        assert_eq!(Converter::Default.convert_column(&column("a", false, 0))[4], "NO");
        assert_eq!(Converter::Default.convert_column(&column("a", true, 0))[4], "");
    }

    #[test]
    fn test_convert_column_pk_position() {
        assert_eq!(Converter::Default.convert_column(&column("a", false, 0))[0], "");
        assert_eq!(Converter::Default.convert_column(&column("a", false, 1))[0], "1");
        assert_eq!(Converter::Default.convert_column(&column("a", false, 12))[0], "12");
    }

    #[test]
    fn test_default_converter_keeps_internal_type_names() {
        let mut col = column("id", false, 1);
        col.data_type = "int4".to_string();
        col.size = Size::numeric(Some(32), Some(0));
        col.default_value = "nextval('items_id_seq'::regclass)".to_string();
        let row = Converter::Default.convert_column(&col);
        assert_eq!(row[2], "int4");
        assert_eq!(row[3], "32, 0");
        assert_eq!(row[5], "nextval('items_id_seq'::regclass)");
    }

    #[test]
    fn test_convert_index() {
        let idx = Index {
            name: "items_code_idx".to_string(),
            unique: true,
            columns: vec![column("shop_id", false, 0), column("code", false, 0)],
            ..Index::default()
        };
        assert_eq!(
            Converter::Default.convert_index(&idx),
            ["items_code_idx", "shop_id, code", "YES"]
        );

        let idx = Index {
            unique: false,
            ..idx
        };
        assert_eq!(Converter::Default.convert_index(&idx)[2], "");
    }

    #[test]
    fn test_convert_constraint() {
        let con = Constraint {
            name: "items_price_check".to_string(),
            kind: "CHECK".to_string(),
            content: "CHECK ((price >= 0))".to_string(),
            ..Constraint::default()
        };
        assert_eq!(
            Converter::Default.convert_constraint(&con),
            ["items_price_check", "CHECK", "CHECK ((price >= 0))"]
        );
    }

    #[test]
    fn test_convert_foreign_key_same_schema() {
        let fk = ForeignKey {
            name: "orders_item_fk".to_string(),
            column_references: vec![reference(
                ("public", "orders", "item_id"),
                ("public", "items", "id"),
            )],
            ..ForeignKey::default()
        };
        assert_eq!(
            Converter::Default.convert_foreign_key(&fk),
            ["orders_item_fk", "item_id", "items", "id"]
        );
    }

    #[test]
    fn test_convert_foreign_key_cross_schema() {
        let fk = ForeignKey {
            name: "orders_item_fk".to_string(),
            column_references: vec![
                reference(("sales", "orders", "shop_id"), ("master", "items", "shop_id")),
                reference(("sales", "orders", "item_code"), ("master", "items", "code")),
            ],
            ..ForeignKey::default()
        };
        assert_eq!(
            Converter::Default.convert_foreign_key(&fk),
            [
                "orders_item_fk",
                "shop_id, item_code",
                "master.items",
                "shop_id, code"
            ]
        );
    }

    #[test]
    fn test_convert_referenced_key() {
        let fk = ForeignKey {
            name: "orders_item_fk".to_string(),
            column_references: vec![reference(
                ("public", "orders", "item_id"),
                ("public", "items", "id"),
            )],
            ..ForeignKey::default()
        };
        assert_eq!(
            Converter::Default.convert_referenced_key(&fk),
            ["orders_item_fk", "orders", "item_id", "id"]
        );
    }

    #[test]
    fn test_convert_referenced_key_cross_schema() {
        let fk = ForeignKey {
            name: "orders_item_fk".to_string(),
            column_references: vec![reference(
                ("sales", "orders", "item_id"),
                ("master", "items", "id"),
            )],
            ..ForeignKey::default()
        };
        assert_eq!(
            Converter::Default.convert_referenced_key(&fk),
            ["orders_item_fk", "sales.orders", "item_id", "id"]
        );
    }

    #[test]
    fn test_convert_foreign_key_without_references() {
        let fk = ForeignKey {
            name: "broken".to_string(),
            ..ForeignKey::default()
        };
        assert_eq!(Converter::Default.convert_foreign_key(&fk), ["broken", "", "", ""]);
        assert_eq!(Converter::Default.convert_referenced_key(&fk), ["broken", "", "", ""]);
    }

    #[test]
    fn test_pretty_converter_delegates_non_column_entities() {
        let con = Constraint {
            name: "c".to_string(),
            kind: "CHECK".to_string(),
            content: "CHECK (true)".to_string(),
            ..Constraint::default()
        };
        assert_eq!(
            Converter::PostgresPretty.convert_constraint(&con),
            Converter::Default.convert_constraint(&con)
        );
    }
}
