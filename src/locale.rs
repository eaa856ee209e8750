//! Localized titles and headers for rendered tables.
//!
//! Labels are addressed by `(category, key)`. Unknown locale ids fall back to
//! English, unknown categories or keys resolve to an empty string.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    pub fn from_id(id: &str) -> Self {
        match id {
            "ja" => Self::Ja,
            _ => Self::En,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
        }
    }

    pub fn t(self, category: &str, key: &str) -> &'static str {
        match self {
            Self::En => en(category, key),
            Self::Ja => ja(category, key),
        }
    }
}

/// Look up a label by locale id.
pub fn translate(locale: &str, category: &str, key: &str) -> &'static str {
    Locale::from_id(locale).t(category, key)
}

fn en(category: &str, key: &str) -> &'static str {
    match (category, key) {
        ("table_list", "title") => "Table index",
        ("table_list", "table") => "TABLE",
        ("table_list", "comment") => "COMMENT",

        ("column", "title") => "Columns",
        ("column", "primary_key") => "PK",
        ("column", "name") => "NAME",
        ("column", "data_type") => "TYPE",
        ("column", "size") => "SIZE",
        ("column", "null") => "NULL",
        ("column", "default_value") => "DEFAULT",
        ("column", "comment") => "COMMENT",

        ("index", "title") => "Indices",
        ("index", "name") => "NAME",
        ("index", "columns") => "COLUMNS",
        ("index", "unique") => "UNIQUE",

        ("constraint", "title") => "Constraints",
        ("constraint", "name") => "NAME",
        ("constraint", "kind") => "KIND",
        ("constraint", "content") => "CONTENT",

        ("foreign_key", "title") => "Foreign keys",
        ("foreign_key", "name") => "NAME",
        ("foreign_key", "columns") => "COLUMNS",
        ("foreign_key", "foreign_table") => "FOREIGN TABLE",
        ("foreign_key", "foreign_columns") => "FOREIGN COLUMNS",

        ("referenced_key", "title") => "Referenced keys",
        ("referenced_key", "name") => "NAME",
        ("referenced_key", "source_table") => "SOURCE TABLE",
        ("referenced_key", "source_columns") => "SOURCE COLUMNS",
        ("referenced_key", "columns") => "COLUMNS",

        _ => "",
    }
}

fn ja(category: &str, key: &str) -> &'static str {
    match (category, key) {
        ("table_list", "title") => "テーブル一覧",
        ("table_list", "table") => "テーブル",
        ("table_list", "comment") => "コメント",

        ("column", "title") => "列一覧",
        ("column", "primary_key") => "PK",
        ("column", "name") => "列名",
        ("column", "data_type") => "型",
        ("column", "size") => "サイズ",
        ("column", "null") => "NULL",
        ("column", "default_value") => "初期値",
        ("column", "comment") => "コメント",

        ("index", "title") => "インデックス",
        ("index", "name") => "名前",
        ("index", "columns") => "列",
        ("index", "unique") => "ユニーク",

        ("constraint", "title") => "制約",
        ("constraint", "name") => "制約名",
        ("constraint", "kind") => "種別",
        ("constraint", "content") => "内容",

        ("foreign_key", "title") => "参照キー",
        ("foreign_key", "name") => "参照名",
        ("foreign_key", "columns") => "列",
        ("foreign_key", "foreign_table") => "参照テーブル",
        ("foreign_key", "foreign_columns") => "参照列",

        ("referenced_key", "title") => "被参照キー",
        ("referenced_key", "name") => "参照名",
        ("referenced_key", "source_table") => "参照元テーブル",
        ("referenced_key", "source_columns") => "参照元列",
        ("referenced_key", "columns") => "被参照列",

        _ => "",
    }
}
