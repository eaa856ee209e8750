//! PostgreSQL catalog introspection.
//!
//! The client owns a current-thread runtime and blocks on every query, so
//! callers see a plain synchronous [`SchemaClient`].

use super::{DetailLevel, SchemaClient};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Column, ColumnReference, Constraint, ForeignKey, Index, Size, Table};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use sqlx::FromRow;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, info};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const TABLES_SQL: &str = r#"
SELECT c.relname::text AS name,
       COALESCE(obj_description(c.oid, 'pg_class'), '') AS comment
FROM pg_catalog.pg_class c
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
WHERE n.nspname = $1
  AND c.relkind IN ('r', 'p')
ORDER BY c.relname
"#;

const TABLE_SQL: &str = r#"
SELECT c.relname::text AS name,
       COALESCE(obj_description(c.oid, 'pg_class'), '') AS comment
FROM pg_catalog.pg_class c
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
WHERE n.nspname = $1
  AND c.relname = $2
  AND c.relkind IN ('r', 'p')
"#;

const COLUMNS_SQL: &str = r#"
SELECT a.attname::text AS name,
       COALESCE(col_description(a.attrelid, a.attnum), '') AS comment,
       COALESCE(ic.domain_schema || '.' || ic.domain_name, ic.udt_name)::text AS data_type,
       ic.character_maximum_length::int8 AS length,
       COALESCE(ic.numeric_precision, ic.datetime_precision)::int8 AS precision,
       ic.numeric_scale::int8 AS scale,
       NOT a.attnotnull AS nullable,
       COALESCE(pg_get_expr(d.adbin, d.adrelid), '') AS default_value,
       COALESCE(array_position(pk.conkey, a.attnum), 0)::int8 AS primary_key_position
FROM pg_catalog.pg_attribute a
JOIN pg_catalog.pg_class c ON c.oid = a.attrelid
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
JOIN information_schema.columns ic
  ON ic.table_schema = n.nspname
 AND ic.table_name = c.relname
 AND ic.column_name = a.attname
LEFT JOIN pg_catalog.pg_attrdef d ON d.adrelid = a.attrelid AND d.adnum = a.attnum
LEFT JOIN pg_catalog.pg_constraint pk ON pk.conrelid = a.attrelid AND pk.contype = 'p'
WHERE n.nspname = $1
  AND c.relname = $2
  AND a.attnum > 0
  AND NOT a.attisdropped
ORDER BY a.attnum
"#;

const INDICES_SQL: &str = r#"
SELECT i.relname::text AS name,
       ix.indisunique AS is_unique,
       array_agg(a.attname::text ORDER BY k.ord) AS columns
FROM pg_catalog.pg_index ix
JOIN pg_catalog.pg_class t ON t.oid = ix.indrelid
JOIN pg_catalog.pg_namespace n ON n.oid = t.relnamespace
JOIN pg_catalog.pg_class i ON i.oid = ix.indexrelid
CROSS JOIN LATERAL unnest(ix.indkey::int2[]) WITH ORDINALITY AS k(attnum, ord)
JOIN pg_catalog.pg_attribute a ON a.attrelid = t.oid AND a.attnum = k.attnum
WHERE n.nspname = $1
  AND t.relname = $2
GROUP BY i.relname, ix.indisunique
ORDER BY i.relname
"#;

const CONSTRAINTS_SQL: &str = r#"
SELECT con.conname::text AS name,
       CASE con.contype
           WHEN 'c' THEN 'CHECK'
           WHEN 'u' THEN 'UNIQUE'
           ELSE 'EXCLUDE'
       END AS kind,
       pg_get_constraintdef(con.oid) AS content
FROM pg_catalog.pg_constraint con
JOIN pg_catalog.pg_class t ON t.oid = con.conrelid
JOIN pg_catalog.pg_namespace n ON n.oid = t.relnamespace
WHERE n.nspname = $1
  AND t.relname = $2
  AND con.contype IN ('c', 'u', 'x')
ORDER BY con.conname
"#;

/// One row per column pair; `{side}` selects outgoing or incoming keys.
const KEYS_SQL: &str = r#"
SELECT con.conname::text AS name,
       sn.nspname::text AS from_schema,
       st.relname::text AS from_table,
       sa.attname::text AS from_column,
       tn.nspname::text AS to_schema,
       tt.relname::text AS to_table,
       ta.attname::text AS to_column
FROM pg_catalog.pg_constraint con
JOIN pg_catalog.pg_class st ON st.oid = con.conrelid
JOIN pg_catalog.pg_namespace sn ON sn.oid = st.relnamespace
JOIN pg_catalog.pg_class tt ON tt.oid = con.confrelid
JOIN pg_catalog.pg_namespace tn ON tn.oid = tt.relnamespace
CROSS JOIN LATERAL unnest(con.conkey, con.confkey) WITH ORDINALITY AS k(from_attnum, to_attnum, ord)
JOIN pg_catalog.pg_attribute sa ON sa.attrelid = con.conrelid AND sa.attnum = k.from_attnum
JOIN pg_catalog.pg_attribute ta ON ta.attrelid = con.confrelid AND ta.attnum = k.to_attnum
WHERE con.contype = 'f'
  AND {side}n.nspname = $1
  AND {side}t.relname = $2
ORDER BY con.conname, sn.nspname, st.relname, k.ord
"#;

#[derive(Debug, FromRow)]
struct TableRow {
    name: String,
    comment: String,
}

#[derive(Debug, FromRow)]
struct ColumnRow {
    name: String,
    comment: String,
    data_type: String,
    length: Option<i64>,
    precision: Option<i64>,
    scale: Option<i64>,
    nullable: bool,
    default_value: String,
    primary_key_position: i64,
}

#[derive(Debug, FromRow)]
struct IndexRow {
    name: String,
    is_unique: bool,
    columns: Vec<String>,
}

#[derive(Debug, FromRow)]
struct ConstraintRow {
    name: String,
    kind: String,
    content: String,
}

#[derive(Debug, FromRow)]
struct KeyRow {
    name: String,
    from_schema: String,
    from_table: String,
    from_column: String,
    to_schema: String,
    to_table: String,
    to_column: String,
}

pub struct PostgresClient {
    runtime: Runtime,
    options: PgConnectOptions,
    pool: Option<PgPool>,
}

impl PostgresClient {
    pub fn new(config: &Config) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            runtime,
            options: connect_options(config)?,
            pool: None,
        })
    }

    fn pool(&self) -> Result<&PgPool> {
        self.pool.as_ref().ok_or(Error::NotConnected)
    }

    fn fetch_table_rows(&self, schema: &str) -> Result<Vec<TableRow>> {
        let pool = self.pool()?;
        let rows = self.runtime.block_on(
            sqlx::query_as::<_, TableRow>(TABLES_SQL)
                .bind(schema)
                .fetch_all(pool),
        )?;
        debug!(schema, count = rows.len(), "fetched table names");
        Ok(rows)
    }

    /// Fill in the parts of `table` requested by `detail`.
    fn describe(&self, schema: &str, row: TableRow, detail: DetailLevel) -> Result<Table> {
        let pool = self.pool()?;
        let mut table = Table::new(schema, row.name, row.comment);
        let name = table.name.clone();

        let columns = self.runtime.block_on(
            sqlx::query_as::<_, ColumnRow>(COLUMNS_SQL)
                .bind(schema)
                .bind(&name)
                .fetch_all(pool),
        )?;
        table.columns = columns
            .into_iter()
            .map(|c| Column {
                schema: schema.to_string(),
                table_name: name.clone(),
                name: c.name,
                comment: c.comment,
                data_type: c.data_type,
                size: Size {
                    length: c.length,
                    precision: c.precision,
                    scale: c.scale,
                },
                nullable: c.nullable,
                default_value: c.default_value,
                primary_key_position: c.primary_key_position,
            })
            .collect();

        if detail == DetailLevel::Columns {
            debug!(schema, table = %name, columns = table.columns.len(), "described table");
            return Ok(table);
        }

        let indices = self.runtime.block_on(
            sqlx::query_as::<_, IndexRow>(INDICES_SQL)
                .bind(schema)
                .bind(&name)
                .fetch_all(pool),
        )?;
        table.indices = indices
            .into_iter()
            .map(|i| Index {
                schema: schema.to_string(),
                table_name: name.clone(),
                name: i.name,
                unique: i.is_unique,
                columns: i
                    .columns
                    .iter()
                    .map(|col| {
                        table
                            .columns
                            .iter()
                            .find(|c| &c.name == col)
                            .cloned()
                            .unwrap_or_else(|| {
                                Column::reference(schema, name.as_str(), col.as_str())
                            })
                    })
                    .collect(),
            })
            .collect();

        let constraints = self.runtime.block_on(
            sqlx::query_as::<_, ConstraintRow>(CONSTRAINTS_SQL)
                .bind(schema)
                .bind(&name)
                .fetch_all(pool),
        )?;
        table.constraints = constraints
            .into_iter()
            .map(|c| Constraint {
                schema: schema.to_string(),
                table_name: name.clone(),
                name: c.name,
                kind: c.kind,
                content: c.content,
            })
            .collect();

        table.foreign_keys = self.fetch_keys(schema, &name, "s")?;
        table.referenced_keys = self.fetch_keys(schema, &name, "t")?;

        debug!(
            schema,
            table = %name,
            columns = table.columns.len(),
            indices = table.indices.len(),
            constraints = table.constraints.len(),
            foreign_keys = table.foreign_keys.len(),
            referenced_keys = table.referenced_keys.len(),
            "described table"
        );
        Ok(table)
    }

    /// `side` is `s` for keys declared on the table, `t` for keys pointing at it.
    fn fetch_keys(&self, schema: &str, table: &str, side: &str) -> Result<Vec<ForeignKey>> {
        let pool = self.pool()?;
        let sql = KEYS_SQL.replace("{side}", side);
        let rows = self.runtime.block_on(
            sqlx::query_as::<_, KeyRow>(&sql)
                .bind(schema)
                .bind(table)
                .fetch_all(pool),
        )?;
        Ok(group_keys(rows))
    }
}

/// Fold the rows of each constraint into one key, keeping first-seen order.
///
/// Constraint names are unique per table only, so a key is identified by its
/// name together with the declaring table.
fn group_keys(rows: Vec<KeyRow>) -> Vec<ForeignKey> {
    let mut keys: Vec<ForeignKey> = Vec::new();
    for row in rows {
        let reference = ColumnReference {
            from: Column::reference(
                row.from_schema.as_str(),
                row.from_table.as_str(),
                row.from_column,
            ),
            to: Column::reference(row.to_schema, row.to_table, row.to_column),
        };
        let existing = keys.iter_mut().find(|key| {
            key.name == row.name
                && key.schema == row.from_schema
                && key.table_name == row.from_table
        });
        match existing {
            Some(key) => key.column_references.push(reference),
            _ => keys.push(ForeignKey {
                schema: row.from_schema,
                table_name: row.from_table,
                name: row.name,
                column_references: vec![reference],
            }),
        }
    }
    keys
}

fn connect_options(config: &Config) -> Result<PgConnectOptions> {
    // Unset fields keep libpq defaults (PGHOST, PGUSER, ...).
    let mut options = PgConnectOptions::new();
    if !config.host.is_empty() {
        options = options.host(&config.host);
    }
    if config.port != 0 {
        options = options.port(config.port);
    }
    if !config.user.is_empty() {
        options = options.username(&config.user);
    }
    if !config.password.is_empty() {
        options = options.password(&config.password);
    }
    if !config.database.is_empty() {
        options = options.database(&config.database);
    }

    let mut params: Vec<(&str, &str)> = Vec::new();
    for (key, value) in &config.options {
        match key.as_str() {
            "sslmode" => options = options.ssl_mode(value.parse::<PgSslMode>()?),
            "application_name" => options = options.application_name(value),
            _ => params.push((key.as_str(), value.as_str())),
        }
    }
    if !params.is_empty() {
        options = options.options(params);
    }
    Ok(options)
}

impl SchemaClient for PostgresClient {
    fn connect(&mut self) -> Result<()> {
        if self.pool.is_some() {
            return Ok(());
        }
        let pool = self.runtime.block_on(
            PgPoolOptions::new()
                .max_connections(1)
                .acquire_timeout(CONNECT_TIMEOUT)
                .connect_with(self.options.clone()),
        )?;
        info!(
            host = self.options.get_host(),
            port = self.options.get_port(),
            database = self.options.get_database().unwrap_or_default(),
            "connected"
        );
        self.pool = Some(pool);
        Ok(())
    }

    fn disconnect(&mut self) {
        if let Some(pool) = self.pool.take() {
            self.runtime.block_on(pool.close());
            debug!("disconnected");
        }
    }

    fn all_table_names(&mut self, schema: &str) -> Result<Vec<Table>> {
        Ok(self
            .fetch_table_rows(schema)?
            .into_iter()
            .map(|row| Table::new(schema, row.name, row.comment))
            .collect())
    }

    fn all_tables(&mut self, schema: &str, detail: DetailLevel) -> Result<Vec<Table>> {
        self.fetch_table_rows(schema)?
            .into_iter()
            .map(|row| self.describe(schema, row, detail))
            .collect()
    }

    fn table(&mut self, schema: &str, name: &str, detail: DetailLevel) -> Result<Table> {
        let pool = self.pool()?;
        let row = self
            .runtime
            .block_on(
                sqlx::query_as::<_, TableRow>(TABLE_SQL)
                    .bind(schema)
                    .bind(name)
                    .fetch_optional(pool),
            )?
            .ok_or_else(|| Error::TableNotFound {
                schema: schema.to_string(),
                name: name.to_string(),
            })?;
        self.describe(schema, row, detail)
    }
}

impl Drop for PostgresClient {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_row(name: &str, from: &str, to: &str) -> KeyRow {
        key_row_of("orders", name, from, to)
    }

    fn key_row_of(table: &str, name: &str, from: &str, to: &str) -> KeyRow {
        KeyRow {
            name: name.to_string(),
            from_schema: "public".to_string(),
            from_table: table.to_string(),
            from_column: from.to_string(),
            to_schema: "master".to_string(),
            to_table: "items".to_string(),
            to_column: to.to_string(),
        }
    }

    #[test]
    fn test_group_keys() {
        let keys = group_keys(vec![
            key_row("orders_item_fk", "shop_id", "shop_id"),
            key_row("orders_item_fk", "item_code", "code"),
            key_row("orders_shop_fk", "shop_id", "id"),
        ]);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].column_references.len(), 2);
        assert_eq!(keys[0].column_references[1].from.name, "item_code");
        assert_eq!(keys[0].column_references[1].to.schema, "master");
        assert_eq!(keys[1].name, "orders_shop_fk");
    }

    #[test]
    fn test_group_keys_same_name_on_two_tables() {
        // Referenced keys named alike on two tables, in query order.
        let keys = group_keys(vec![
            key_row_of("invoices", "item_fk", "shop_id", "shop_id"),
            key_row_of("invoices", "item_fk", "item_code", "code"),
            key_row_of("orders", "item_fk", "shop_id", "shop_id"),
            key_row_of("orders", "item_fk", "item_code", "code"),
        ]);
        let shape: Vec<_> = keys
            .iter()
            .map(|k| (k.table_name.as_str(), k.column_references.len()))
            .collect();
        assert_eq!(shape, [("invoices", 2), ("orders", 2)]);
    }

    #[test]
    fn test_group_keys_interleaved_rows() {
        let keys = group_keys(vec![
            key_row_of("invoices", "item_fk", "shop_id", "shop_id"),
            key_row_of("orders", "item_fk", "shop_id", "shop_id"),
            key_row_of("invoices", "item_fk", "item_code", "code"),
            key_row_of("orders", "item_fk", "item_code", "code"),
        ]);
        assert_eq!(keys.len(), 2);
        for key in &keys {
            let from: Vec<_> = key.column_references.iter().map(|r| r.from.name.as_str()).collect();
            assert_eq!(from, ["shop_id", "item_code"]);
            assert!(key.column_references.iter().all(|r| r.from.table_name == key.table_name));
        }
    }

    #[test]
    fn test_connect_options() {
        let config = Config::from_json(
            r#"{
                "driver": "postgres",
                "host": "db.internal",
                "port": 5433,
                "user": "reader",
                "password": "secret",
                "database": "shop",
                "schema": "public",
                "options": {"sslmode": "disable", "application_name": "tablarian"}
            }"#,
        )
        .unwrap();
        let options = connect_options(&config).unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_username(), "reader");
        assert_eq!(options.get_database(), Some("shop"));
    }

    #[test]
    fn test_invalid_sslmode() {
        let config = Config::from_json(
            r#"{"driver": "postgres", "options": {"sslmode": "sometimes"}}"#,
        )
        .unwrap();
        assert!(matches!(connect_options(&config), Err(Error::Database(_))));
    }

    #[test]
    fn test_query_without_connection() {
        let config = Config::from_json(r#"{"driver": "postgres"}"#).unwrap();
        let mut client = PostgresClient::new(&config).unwrap();
        assert!(matches!(client.all_table_names("public"), Err(Error::NotConnected)));
    }
}
