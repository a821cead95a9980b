//! Storage backend factory.
//!
//! Creates the storage backend based on configuration.

use std::sync::Arc;

use crate::config::StorageConfig;
use crate::error::AppError;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::StudentStorage;

/// Create a storage backend based on configuration.
///
/// The `students` table is created if absent before the backend is returned.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, the schema cannot be
/// created, or the health check fails.
pub async fn create_storage(config: &StorageConfig) -> Result<Arc<dyn StudentStorage>, AppError> {
    let storage = SqliteStorage::connect(config)
        .await
        .map_err(AppError::Storage)?;

    // Verify storage is healthy
    storage.health_check().await.map_err(AppError::Storage)?;

    Ok(Arc::new(storage))
}
