pub mod client;
#[cfg(not(target_arch = "wasm32"))]
pub mod commands;
pub mod config;
pub mod convert;
pub mod error;
pub mod locale;
pub mod logging;
pub mod model;
pub mod publish;
pub mod render;

pub use error::Error;

use wasm_bindgen::prelude::*;

use client::{DetailLevel, SchemaClient, SnapshotClient};
use convert::Converter;
use locale::Locale;
use render::markdown;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render one table of a JSON snapshot (array of tables) to Markdown.
///
/// `table` may be qualified as `schema.name`; unqualified names are looked up
/// in `public`.
#[wasm_bindgen(js_name = "schemaToMarkdown")]
pub fn schema_to_markdown(
    snapshot: &str,
    table: &str,
    locale: Option<String>,
    driver: Option<String>,
    pretty: Option<bool>,
) -> Result<String, String> {
    let mut client = SnapshotClient::from_json(snapshot).map_err(|e| e.to_string())?;
    let (schema, name) = table.split_once('.').unwrap_or(("public", table));
    let table = client
        .table(schema, name, DetailLevel::All)
        .map_err(|e| e.to_string())?;

    let converter = Converter::find(
        pretty.unwrap_or(false),
        driver.as_deref().unwrap_or("postgres"),
    );
    let locale = Locale::from_id(locale.as_deref().unwrap_or_default());
    Ok(markdown::table_document(&table, converter, locale))
}

/// Render the linked table index of a JSON snapshot to Markdown.
#[wasm_bindgen(js_name = "schemaIndexToMarkdown")]
pub fn schema_index_to_markdown(snapshot: &str, locale: Option<String>) -> Result<String, String> {
    let client = SnapshotClient::from_json(snapshot).map_err(|e| e.to_string())?;
    let locale = Locale::from_id(locale.as_deref().unwrap_or_default());
    Ok(markdown::index_document(client.tables(), locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[
        {"schema": "public", "name": "items", "comment": "Items for sale.",
         "columns": [{"name": "id", "data_type": "int4", "default_value": "nextval('items_id_seq'::regclass)",
                      "table_name": "items", "primary_key_position": 1}]},
        {"schema": "audit", "name": "logs"}
    ]"#;

    #[test]
    fn test_schema_to_markdown() {
        let doc = schema_to_markdown(SNAPSHOT, "items", None, None, Some(true)).unwrap();
        assert!(doc.starts_with("# items\n\nItems for sale.\n"));
        assert!(doc.contains("| serial |"));

        let doc =
            schema_to_markdown(SNAPSHOT, "audit.logs", Some("ja".to_string()), None, None).unwrap();
        assert!(doc.contains("## 列一覧"));
    }

    #[test]
    fn test_schema_to_markdown_errors() {
        assert!(schema_to_markdown("{", "items", None, None, None).is_err());
        let err = schema_to_markdown(SNAPSHOT, "shops", None, None, None).unwrap_err();
        assert_eq!(err, "Table 'public.shops' is not found.");
    }

    #[test]
    fn test_schema_index_to_markdown() {
        let doc = schema_index_to_markdown(SNAPSHOT, None).unwrap();
        assert!(doc.contains("| [items](items.md) | Items for sale. |"));
        assert!(doc.contains("| [logs](logs.md)"));
    }
}
