//! Student service.
//!
//! Validates write payloads and maps storage outcomes onto the three-way
//! success / not found / error result the API reports.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    PayloadError, Student, StudentId, StudentInput, StudentPayload, WriteOperation,
    parse_student_id,
};
use crate::error::{AppError, Result};
use crate::storage::traits::StudentStorage;

/// Service for student CRUD operations.
pub struct StudentService {
    /// Storage backend.
    storage: Arc<dyn StudentStorage>,
}

impl StudentService {
    /// Create a new student service.
    pub fn new(storage: Arc<dyn StudentStorage>) -> Self {
        Self { storage }
    }

    /// List every student.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn list(&self) -> Result<Vec<Student>> {
        self.storage
            .get_all()
            .await
            .map_err(|e| AppError::storage(e, "Failed to fetch students"))
    }

    /// Create a student from a request payload.
    ///
    /// # Returns
    ///
    /// The stored record, including its generated id.
    ///
    /// # Errors
    ///
    /// Returns a validation error before touching storage if the payload is
    /// empty or missing required fields, or a storage error if the insert fails.
    pub async fn create(&self, payload: StudentPayload) -> Result<Student> {
        let input = Self::validate(payload, WriteOperation::Create)?;

        let id = self
            .storage
            .insert(&input)
            .await
            .map_err(|e| AppError::storage(e, "Database insertion failed"))?;

        info!(id, "Student created");
        Ok(Student::from_input(id, input))
    }

    /// Get one student by the raw id from the request path.
    ///
    /// # Errors
    ///
    /// Returns `StudentNotFound` if no row matches, or a storage error.
    pub async fn get(&self, raw_id: &str) -> Result<Student> {
        let Some(id) = parse_student_id(raw_id) else {
            return Err(AppError::StudentNotFound);
        };

        self.storage
            .get_by_id(id)
            .await?
            .ok_or(AppError::StudentNotFound)
    }

    /// Overwrite every field of a student. A missing `age` clears it.
    ///
    /// # Returns
    ///
    /// The number of changed rows and the record as now stored.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `NoSuchStudent` if no row matches, or a
    /// storage error.
    pub async fn update(&self, raw_id: &str, payload: StudentPayload) -> Result<(u64, Student)> {
        let input = Self::validate(payload, WriteOperation::Update)?;

        let Some(id) = parse_student_id(raw_id) else {
            return Err(no_such_student(raw_id));
        };

        let changes = self
            .storage
            .update(id, &input)
            .await
            .map_err(|e| AppError::storage(e, "Database update failed"))?;

        if changes == 0 {
            return Err(no_such_student(raw_id));
        }

        info!(id, "Student updated");
        Ok((changes, Student::from_input(id, input)))
    }

    /// Delete a student.
    ///
    /// # Returns
    ///
    /// The parsed id and the number of removed rows.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchStudent` if no row matches, or a storage error.
    pub async fn delete(&self, raw_id: &str) -> Result<(StudentId, u64)> {
        let Some(id) = parse_student_id(raw_id) else {
            return Err(no_such_student(raw_id));
        };

        let changes = self
            .storage
            .delete(id)
            .await
            .map_err(|e| AppError::storage(e, "Database deletion failed"))?;

        if changes == 0 {
            return Err(no_such_student(raw_id));
        }

        info!(id, "Student deleted");
        Ok((id, changes))
    }

    fn validate(payload: StudentPayload, operation: WriteOperation) -> Result<StudentInput> {
        payload.validate(operation).map_err(|e| {
            debug!(?operation, error = ?e, "Rejected student payload");
            match e {
                PayloadError::Empty => AppError::NoData,
                PayloadError::MissingFields => AppError::MissingFields {
                    operation,
                    received: payload.into_value(),
                },
            }
        })
    }
}

fn no_such_student(raw_id: &str) -> AppError {
    AppError::NoSuchStudent {
        id: raw_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::storage::create_storage;
    use serde_json::{Value, json};

    async fn service() -> StudentService {
        let storage = create_storage(&StorageConfig::in_memory()).await.unwrap();
        StudentService::new(storage)
    }

    fn payload(value: Value) -> StudentPayload {
        serde_json::from_value(value).unwrap()
    }

    fn john() -> StudentPayload {
        payload(json!({
            "firstname": "John",
            "lastname": "Doe",
            "gender": "male",
            "age": "25"
        }))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service().await;

        let created = service.create(john()).await.unwrap();
        let fetched = service.get(&created.id.to_string()).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.age.as_deref(), Some("25"));
    }

    #[tokio::test]
    async fn test_create_rejects_before_insert() {
        let service = service().await;

        let err = service
            .create(payload(json!({"firstname": "John", "gender": "male"})))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingFields {
                operation: WriteOperation::Create,
                ..
            }
        ));

        let err = service.create(StudentPayload::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NoData));

        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_stores_age_as_sent() {
        let service = service().await;

        for (age, expected) in [
            (json!(""), Some("")),
            (json!("   "), Some("   ")),
            (json!(0), Some("0")),
        ] {
            let created = service
                .create(payload(json!({
                    "firstname": "John",
                    "lastname": "Doe",
                    "gender": "male",
                    "age": age
                })))
                .await
                .unwrap();

            let stored = service.get(&created.id.to_string()).await.unwrap();
            assert_eq!(stored.age.as_deref(), expected);
        }
    }

    #[tokio::test]
    async fn test_update_clears_falsy_age_keeps_whitespace() {
        let service = service().await;
        let id = service.create(john()).await.unwrap().id.to_string();

        service
            .update(
                &id,
                payload(json!({"firstname": "John", "lastname": "Doe", "gender": "male", "age": ""})),
            )
            .await
            .unwrap();
        assert_eq!(service.get(&id).await.unwrap().age, None);

        service
            .update(
                &id,
                payload(json!({"firstname": "John", "lastname": "Doe", "gender": "male", "age": "  "})),
            )
            .await
            .unwrap();
        assert_eq!(service.get(&id).await.unwrap().age.as_deref(), Some("  "));
    }

    #[tokio::test]
    async fn test_missing_fields_echoes_received() {
        let service = service().await;
        let body = json!({"firstname": "", "lastname": "Doe", "gender": "male"});

        let err = service.create(payload(body.clone())).await.unwrap_err();
        let AppError::MissingFields { received, .. } = err else {
            panic!("expected MissingFields");
        };
        assert_eq!(received, body);
    }

    #[tokio::test]
    async fn test_get_unknown_and_unparsable_ids() {
        let service = service().await;

        assert!(matches!(
            service.get("99").await,
            Err(AppError::StudentNotFound)
        ));
        assert!(matches!(
            service.get("not-a-number").await,
            Err(AppError::StudentNotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_clears_omitted_age() {
        let service = service().await;
        let created = service.create(john()).await.unwrap();
        let id = created.id.to_string();

        let (changes, updated) = service
            .update(
                &id,
                payload(json!({"firstname": "Jane", "lastname": "Doe", "gender": "female"})),
            )
            .await
            .unwrap();

        assert_eq!(changes, 1);
        assert_eq!(updated.age, None);
        assert_eq!(service.get(&id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let service = service().await;

        let err = service.update("5", john()).await.unwrap_err();
        let AppError::NoSuchStudent { id } = err else {
            panic!("expected NoSuchStudent");
        };
        assert_eq!(id, "5");
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let service = service().await;

        let err = service
            .update("5", payload(json!({"firstname": "Jane"})))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingFields {
                operation: WriteOperation::Update,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = service().await;
        let created = service.create(john()).await.unwrap();
        let id = created.id.to_string();

        assert_eq!(service.delete(&id).await.unwrap(), (created.id, 1));
        assert!(matches!(
            service.delete(&id).await,
            Err(AppError::NoSuchStudent { .. })
        ));
    }
}
