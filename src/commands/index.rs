use super::session;
use crate::client::SchemaClient;
use crate::config::Config;
use crate::error::Result;
use crate::render::console;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct IndexOptions {
    pub with_comment: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self { with_comment: true }
    }
}

/// Print the names of all tables in the configured schema.
pub fn run(
    client: &mut dyn SchemaClient,
    config: &Config,
    opts: &IndexOptions,
    out: &mut dyn Write,
) -> Result<()> {
    let tables = session(client, |c| c.all_table_names(&config.schema))?;
    for line in console::table_names(&tables, opts.with_comment) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
