use anyhow::Context;
use baghdad_store::{establish_connection, run_migrations, DatabaseConfig};
use tracing::info;

pub fn main() -> anyhow::Result<()> {
    let config = DatabaseConfig::from_env()?;
    let conn = &mut establish_connection(&config)?;

    let applied = run_migrations(conn).context("Cannot migrate schema")?;
    info!(applied, database = config.redacted(), "schema is up to date");
    Ok(())
}
