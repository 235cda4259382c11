use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub mod config;
pub mod decimal;
pub mod error;
pub mod models;
pub mod schema;

pub use config::DatabaseConfig;
pub use error::{ConfigError, StoreError};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub fn establish_connection(config: &DatabaseConfig) -> Result<PgConnection, StoreError> {
    PgConnection::establish(config.url()).map_err(|source| StoreError::Connection {
        target: config.redacted().to_string(),
        source,
    })
}

pub fn run_migrations(conn: &mut PgConnection) -> Result<usize, StoreError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(StoreError::Migration)?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}
