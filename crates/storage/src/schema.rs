//! Startup Schema Check

use sqlx::sqlite::SqliteConnection;
use tracing::debug;

use crate::records::TableSchema;
use crate::StorageError;

/// Verify that `T::TABLE` exists and carries every required column.
///
/// A missing table shows up as a table with no columns.
pub(crate) async fn verify_table<T: TableSchema>(
    session: &mut SqliteConnection,
) -> Result<(), StorageError> {
    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
        .bind(T::TABLE)
        .fetch_all(&mut *session)
        .await?;

    let missing: Vec<&'static str> = T::REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !columns.iter().any(|c| c.eq_ignore_ascii_case(required)))
        .collect();

    if !missing.is_empty() {
        return Err(StorageError::SchemaMismatch {
            table: T::TABLE,
            missing,
        });
    }

    debug!("Table {} has columns {:?}", T::TABLE, columns);
    Ok(())
}
