use super::session;
use crate::client::{DetailLevel, SchemaClient};
use crate::config::Config;
use crate::convert::Converter;
use crate::error::Result;
use crate::locale::Locale;
use crate::render::console;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    pub table: String,
    pub detail: DetailLevel,
    pub pretty: bool,
    pub locale: Locale,
}

/// Print the definition of one table as console tables.
pub fn run(
    client: &mut dyn SchemaClient,
    config: &Config,
    opts: &ShowOptions,
    out: &mut dyn Write,
) -> Result<()> {
    let table = session(client, |c| c.table(&config.schema, &opts.table, opts.detail))?;
    let converter = Converter::find(opts.pretty, &config.driver);
    out.write_all(console::render_table(&table, converter, opts.locale, opts.detail).as_bytes())?;
    Ok(())
}
