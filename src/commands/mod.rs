//! Subcommand entry points.
//!
//! Each command takes its options, a client and the output stream explicitly so
//! the CLI and the tests drive the same code.

pub mod index;
pub mod init;
pub mod publish;
pub mod show;
pub mod version;

use crate::client::{PostgresClient, SchemaClient};
use crate::config::{Config, Driver};
use crate::error::Result;

/// Client for the driver named in `config`.
pub fn client_for(config: &Config) -> Result<Box<dyn SchemaClient>> {
    match config.driver()? {
        Driver::Postgres => Ok(Box::new(PostgresClient::new(config)?)),
    }
}

/// Run `f` between `connect` and `disconnect`.
fn session<T>(
    client: &mut dyn SchemaClient,
    f: impl FnOnce(&mut dyn SchemaClient) -> Result<T>,
) -> Result<T> {
    client.connect()?;
    let result = f(&mut *client);
    client.disconnect();
    result
}
