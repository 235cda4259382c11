use std::error::Error as StdError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),
    #[error("{name} is not valid: {value}")]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Error connecting to {target}")]
    Connection {
        target: String,
        #[source]
        source: diesel::ConnectionError,
    },
    #[error(transparent)]
    Query(#[from] diesel::result::Error),
    #[error("Failed to run migrations")]
    Migration(#[source] Box<dyn StdError + Send + Sync>),
}
