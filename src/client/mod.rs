//! Schema introspection boundary.
//!
//! Rendering only ever sees [`Table`] snapshots. Where they come from is the
//! business of a [`SchemaClient`]: a live PostgreSQL catalog or a JSON
//! snapshot kept in memory.

#[cfg(not(target_arch = "wasm32"))]
mod postgres;

#[cfg(not(target_arch = "wasm32"))]
pub use postgres::PostgresClient;

use crate::error::{Error, Result};
use crate::model::Table;

/// How much of each table an introspection call fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    /// Name, comment and columns.
    #[default]
    Columns,
    /// Columns plus indices, constraints, foreign and referenced keys.
    All,
}

impl DetailLevel {
    pub fn from_all_flag(all: bool) -> Self {
        if all { Self::All } else { Self::Columns }
    }
}

pub trait SchemaClient {
    fn connect(&mut self) -> Result<()>;

    fn disconnect(&mut self);

    /// Tables of `schema` with only name and comment filled in.
    fn all_table_names(&mut self, schema: &str) -> Result<Vec<Table>>;

    fn all_tables(&mut self, schema: &str, detail: DetailLevel) -> Result<Vec<Table>>;

    fn table(&mut self, schema: &str, name: &str, detail: DetailLevel) -> Result<Table>;
}

/// Serves tables from an in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotClient {
    tables: Vec<Table>,
}

impl SnapshotClient {
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Parse a JSON array of tables.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    fn in_schema<'a>(&'a self, schema: &'a str) -> impl Iterator<Item = &'a Table> + 'a {
        self.tables.iter().filter(move |t| t.schema == schema)
    }
}

fn with_detail(table: &Table, detail: DetailLevel) -> Table {
    match detail {
        DetailLevel::All => table.clone(),
        DetailLevel::Columns => table.clone().columns_only(),
    }
}

impl SchemaClient for SnapshotClient {
    fn connect(&mut self) -> Result<()> {
        Ok(())
    }

    fn disconnect(&mut self) {}

    fn all_table_names(&mut self, schema: &str) -> Result<Vec<Table>> {
        Ok(self
            .in_schema(schema)
            .map(|t| Table::new(t.schema.as_str(), t.name.as_str(), t.comment.as_str()))
            .collect())
    }

    fn all_tables(&mut self, schema: &str, detail: DetailLevel) -> Result<Vec<Table>> {
        Ok(self.in_schema(schema).map(|t| with_detail(t, detail)).collect())
    }

    fn table(&mut self, schema: &str, name: &str, detail: DetailLevel) -> Result<Table> {
        self.in_schema(schema)
            .find(|t| t.name == name)
            .map(|t| with_detail(t, detail))
            .ok_or_else(|| Error::TableNotFound {
                schema: schema.to_string(),
                name: name.to_string(),
            })
    }
}
