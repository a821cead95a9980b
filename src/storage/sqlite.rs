//! SQLite storage backend.
//!
//! Stores students in a single table:
//!
//! ```text
//! students
//! ├── id         INTEGER PRIMARY KEY
//! ├── firstname  TEXT NOT NULL
//! ├── lastname   TEXT NOT NULL
//! ├── gender     TEXT NOT NULL
//! └── age        TEXT
//! ```

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::StorageConfig;
use crate::domain::{Student, StudentId, StudentInput};
use crate::error::{StorageError, StorageResult};
use crate::storage::traits::StudentStorage;

const CREATE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY,
    firstname TEXT NOT NULL,
    lastname TEXT NOT NULL,
    gender TEXT NOT NULL,
    age TEXT
)";

/// SQLite-backed student storage.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open a connection pool and make sure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the database cannot be opened,
    /// or the table cannot be created.
    pub async fn connect(config: &StorageConfig) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| StorageError::Connection(format!("Invalid URL {}: {e}", config.url)))?
            .create_if_missing(config.create_if_missing);

        // Every connection to `:memory:` opens its own database, so keep
        // exactly one connection alive for the lifetime of the pool.
        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        let storage = Self::from_pool(pool);
        storage.ensure_schema().await?;

        Ok(storage)
    }

    /// Wrap an existing pool. The schema is not touched.
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `students` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the DDL statement fails.
    pub async fn ensure_schema(&self) -> StorageResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Schema(e.to_string()))?;

        tracing::debug!("Table \"students\" created or already exists");
        Ok(())
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StudentStorage for SqliteStorage {
    async fn insert(&self, student: &StudentInput) -> StorageResult<StudentId> {
        let result = sqlx::query(
            "INSERT INTO students (firstname, lastname, gender, age) VALUES (?, ?, ?, ?)",
        )
        .bind(&student.firstname)
        .bind(&student.lastname)
        .bind(&student.gender)
        .bind(&student.age)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_all(&self) -> StorageResult<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, firstname, lastname, gender, age FROM students ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    async fn get_by_id(&self, id: StudentId) -> StorageResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, firstname, lastname, gender, age FROM students WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    async fn update(&self, id: StudentId, student: &StudentInput) -> StorageResult<u64> {
        let result = sqlx::query(
            "UPDATE students SET firstname = ?, lastname = ?, gender = ?, age = ? WHERE id = ?",
        )
        .bind(&student.firstname)
        .bind(&student.lastname)
        .bind(&student.gender)
        .bind(&student.age)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: StudentId) -> StorageResult<u64> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn memory_storage() -> SqliteStorage {
        SqliteStorage::connect(&StorageConfig::in_memory())
            .await
            .unwrap()
    }

    fn input(firstname: &str, age: Option<&str>) -> StudentInput {
        StudentInput {
            firstname: firstname.to_string(),
            lastname: "Doe".to_string(),
            gender: "male".to_string(),
            age: age.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let storage = memory_storage().await;

        let id = storage.insert(&input("John", Some("25"))).await.unwrap();
        let student = storage.get_by_id(id).await.unwrap().unwrap();

        assert_eq!(student.id, id);
        assert_eq!(student.firstname, "John");
        assert_eq!(student.lastname, "Doe");
        assert_eq!(student.gender, "male");
        assert_eq!(student.age.as_deref(), Some("25"));
    }

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let storage = memory_storage().await;

        let first = storage.insert(&input("A", None)).await.unwrap();
        let second = storage.insert(&input("B", None)).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn test_get_all_empty_and_ordered() {
        let storage = memory_storage().await;
        assert!(storage.get_all().await.unwrap().is_empty());

        storage.insert(&input("A", None)).await.unwrap();
        storage.insert(&input("B", None)).await.unwrap();
        storage.insert(&input("C", None)).await.unwrap();

        let names: Vec<String> = storage
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.firstname)
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let storage = memory_storage().await;
        assert!(storage.get_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let storage = memory_storage().await;
        let id = storage.insert(&input("John", Some("25"))).await.unwrap();

        let changes = storage
            .update(
                id,
                &StudentInput {
                    firstname: "Jane".to_string(),
                    lastname: "Roe".to_string(),
                    gender: "female".to_string(),
                    age: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(changes, 1);

        let student = storage.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(student.firstname, "Jane");
        assert_eq!(student.lastname, "Roe");
        assert_eq!(student.gender, "female");
        assert_eq!(student.age, None);
    }

    #[tokio::test]
    async fn test_update_missing_affects_nothing() {
        let storage = memory_storage().await;
        let changes = storage.update(7, &input("John", None)).await.unwrap();
        assert_eq!(changes, 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let storage = memory_storage().await;
        let id = storage.insert(&input("John", None)).await.unwrap();

        assert_eq!(storage.delete(id).await.unwrap(), 1);
        assert!(storage.get_by_id(id).await.unwrap().is_none());
        assert_eq!(storage.delete(id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_values_are_bound_not_interpolated() {
        let storage = memory_storage().await;
        let hostile = "Robert'); DROP TABLE students;--";

        let id = storage.insert(&input(hostile, None)).await.unwrap();

        let student = storage.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(student.firstname, hostile);
        assert_eq!(storage.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_schema_is_idempotent_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            url: format!(
                "sqlite://{}",
                temp_dir.path().join("students.sqlite").display()
            ),
            ..StorageConfig::default()
        };

        let storage = SqliteStorage::connect(&config).await.unwrap();
        let id = storage.insert(&input("John", None)).await.unwrap();
        storage.pool().close().await;

        let reopened = SqliteStorage::connect(&config).await.unwrap();
        reopened.ensure_schema().await.unwrap();
        let student = reopened.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(student.firstname, "John");
    }

    #[tokio::test]
    async fn test_health_check() {
        let storage = memory_storage().await;
        assert!(storage.health_check().await.is_ok());
        assert_eq!(storage.backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn test_health_check_fails_on_closed_pool() {
        let storage = memory_storage().await;
        storage.pool().close().await;
        assert!(storage.health_check().await.is_err());
    }
}
