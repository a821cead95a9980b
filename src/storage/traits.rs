//! Storage trait definitions.
//!
//! These traits define the interface for storage backends, enabling swapping
//! between different implementations without changing business logic.

use async_trait::async_trait;

use crate::domain::{Student, StudentId, StudentInput};
use crate::error::StorageResult;

/// Row-level operations on the `students` table.
///
/// "No matching row" is never an error here: lookups return `None` and
/// writes report the number of affected rows.
#[async_trait]
pub trait StudentStorage: Send + Sync {
    /// Insert a new student and return the generated row key.
    async fn insert(&self, student: &StudentInput) -> StorageResult<StudentId>;

    /// Fetch every student, in insertion order.
    async fn get_all(&self) -> StorageResult<Vec<Student>>;

    /// Fetch one student by row key.
    async fn get_by_id(&self, id: StudentId) -> StorageResult<Option<Student>>;

    /// Overwrite all fields of a student.
    ///
    /// # Returns
    ///
    /// The number of rows changed; `0` when no row has this key.
    async fn update(&self, id: StudentId, student: &StudentInput) -> StorageResult<u64>;

    /// Delete a student.
    ///
    /// # Returns
    ///
    /// The number of rows removed; `0` when no row has this key.
    async fn delete(&self, id: StudentId) -> StorageResult<u64>;

    /// Check if the storage backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}
