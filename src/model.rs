//! Read-only schema snapshot types produced by a [`crate::client::SchemaClient`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub schema: String,
    pub name: String,
    pub comment: String,
    pub columns: Vec<Column>,
    pub indices: Vec<Index>,
    pub constraints: Vec<Constraint>,
    pub foreign_keys: Vec<ForeignKey>,
    /// Foreign keys of other tables pointing at this one.
    pub referenced_keys: Vec<ForeignKey>,
}

impl Table {
    pub fn new(
        schema: impl Into<String>,
        name: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            comment: comment.into(),
            ..Self::default()
        }
    }

    /// Drop everything but the column list.
    pub fn columns_only(mut self) -> Self {
        self.indices.clear();
        self.constraints.clear();
        self.foreign_keys.clear();
        self.referenced_keys.clear();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    pub schema: String,
    pub table_name: String,
    pub name: String,
    pub comment: String,
    pub data_type: String,
    pub size: Size,
    pub nullable: bool,
    pub default_value: String,
    /// 1-based position inside the primary key, 0 when not a member.
    pub primary_key_position: i64,
}

impl Column {
    /// A column known only by its location, as seen from a foreign key.
    pub fn reference(
        schema: impl Into<String>,
        table_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            table_name: table_name.into(),
            name: name.into(),
            nullable: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    pub length: Option<i64>,
    pub precision: Option<i64>,
    pub scale: Option<i64>,
}

impl Size {
    pub fn length(length: i64) -> Self {
        Self {
            length: Some(length),
            ..Self::default()
        }
    }

    pub fn numeric(precision: Option<i64>, scale: Option<i64>) -> Self {
        Self {
            length: None,
            precision,
            scale,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.length, self.precision, self.scale) {
            (Some(len), _, _) => write!(f, "{len}"),
            (None, Some(p), Some(s)) => write!(f, "{p}, {s}"),
            (None, Some(p), None) => write!(f, "{p}"),
            (None, None, Some(s)) => write!(f, "{s}"),
            (None, None, None) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Index {
    pub schema: String,
    pub table_name: String,
    pub name: String,
    pub unique: bool,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraint {
    pub schema: String,
    pub table_name: String,
    pub name: String,
    pub kind: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForeignKey {
    pub schema: String,
    pub table_name: String,
    pub name: String,
    pub column_references: Vec<ColumnReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReference {
    pub from: Column,
    pub to: Column,
}
