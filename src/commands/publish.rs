use super::session;
use crate::client::{DetailLevel, SchemaClient};
use crate::config::{Config, resolve_path};
use crate::convert::Converter;
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::publish::{Format, Publisher};
use std::io::Write;

pub const ERROR_HEADER: &str = "Error occurred!! ==========";

#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    pub pretty: bool,
    pub format: Format,
    pub locale: Locale,
    pub verbose: bool,
}

/// Write documents of every table in the configured schema to `config.out`.
///
/// Returns the per-file failures; an `Err` means nothing was published.
pub fn run(
    client: &mut dyn SchemaClient,
    config: &Config,
    opts: &PublishOptions,
    out: &mut dyn Write,
) -> Result<Vec<Error>> {
    let dir = resolve_path(&config.out)?;
    let tables = session(client, |c| c.all_tables(&config.schema, DetailLevel::All))?;
    let converter = Converter::find(opts.pretty, &config.driver);

    let mut publisher = Publisher::new(opts.format, converter, opts.locale);
    if opts.verbose {
        publisher = publisher.verbose(out);
    }
    publisher.publish(&dir, &tables)?;
    Ok(publisher.into_errors())
}

/// Print collected failures under [`ERROR_HEADER`].
pub fn report(errors: &[Error], err: &mut dyn Write) -> Result<()> {
    writeln!(err, "{ERROR_HEADER}")?;
    for e in errors {
        writeln!(err, "{e}")?;
    }
    Ok(())
}
