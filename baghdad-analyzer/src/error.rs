use std::path::PathBuf;

use baghdad_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Cannot load rows")]
    Query(#[from] diesel::result::Error),
    #[error("Cannot write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot write {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Cannot draw {path}: {message}")]
    Chart { path: PathBuf, message: String },
    #[error("{column} of order {order_id} is not a finite number")]
    Decimal { column: &'static str, order_id: i32 },
}
