//! Storage Layer
//!
//! Read-only access to the climate dataset stored in a SQLite file.

mod records;
mod schema;
mod store;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use records::{Measurement, PrecipitationReading, Station, TableSchema, TemperatureStats};
pub use store::ClimateStore;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Table `{table}` is missing columns {missing:?}")]
    SchemaMismatch {
        table: &'static str,
        missing: Vec<&'static str>,
    },
    #[error("Measurement table has no rows")]
    EmptyDataset,
    #[error("Stored date `{0}` is not in YYYY-MM-DD form")]
    InvalidStoredDate(String),
}
