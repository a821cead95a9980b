//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::student::{Student, StudentId, StudentInput};

/// Fields a write request must carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["firstname", "lastname", "gender"];

/// Fields a write request may carry.
pub const OPTIONAL_FIELDS: [&str; 1] = ["age"];

/// Which write endpoint a payload was submitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    /// `POST /students`.
    Create,
    /// `PUT /student/:id`.
    Update,
}

impl WriteOperation {
    /// Error message used when required fields are missing.
    #[must_use]
    pub const fn missing_fields_message(self) -> &'static str {
        match self {
            Self::Create => "Missing required fields",
            Self::Update => "Missing required fields (firstname, lastname, gender)",
        }
    }
}

/// Why a payload could not be turned into a [`StudentInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadError {
    /// The body carried no fields at all.
    Empty,
    /// At least one required field is missing or falsy.
    MissingFields,
}

/// Untyped student write body, as decoded from JSON or a form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct StudentPayload {
    fields: Map<String, Value>,
}

impl StudentPayload {
    /// Wrap decoded body fields.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Whether the body carried no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The fields exactly as received.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the payload, returning the fields as a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Validate the payload into typed input.
    ///
    /// Falsy values (absent, `null`, `false`, `0`, empty or whitespace-only
    /// strings) count as missing for the required fields. `age` is kept as
    /// sent on create; on update a falsy `age` clears it.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Empty`] for a body with no fields and
    /// [`PayloadError::MissingFields`] when a required field is missing.
    pub fn validate(&self, operation: WriteOperation) -> Result<StudentInput, PayloadError> {
        if self.is_empty() {
            return Err(PayloadError::Empty);
        }

        let (Some(firstname), Some(lastname), Some(gender)) = (
            self.text("firstname"),
            self.text("lastname"),
            self.text("gender"),
        ) else {
            return Err(PayloadError::MissingFields);
        };

        Ok(StudentInput {
            firstname,
            lastname,
            gender,
            age: self.age(operation),
        })
    }

    fn age(&self, operation: WriteOperation) -> Option<String> {
        let value = self.fields.get("age")?;
        if operation == WriteOperation::Update && is_falsy(value) {
            return None;
        }
        age_text(value)
    }

    fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(field_text)
    }
}

/// Text form of a field value, or `None` if the value is falsy or not text-like.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Whether a value is falsy: `null`, `false`, `0` or `""`.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// `age` as stored: strings verbatim, numbers and booleans as text.
fn age_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Response for `GET /students`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentListResponse {
    /// Number of students returned.
    pub count: usize,
    /// All students.
    pub students: Vec<Student>,
}

impl StudentListResponse {
    /// Build a list response.
    #[must_use]
    pub fn new(students: Vec<Student>) -> Self {
        Self {
            count: students.len(),
            students,
        }
    }
}

/// Response for a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCreatedResponse {
    /// Confirmation message.
    pub message: String,

    /// Generated row key.
    pub id: StudentId,

    /// The record as stored.
    pub student: Student,
}

impl StudentCreatedResponse {
    /// Build a create response echoing the stored record.
    #[must_use]
    pub fn new(student: Student) -> Self {
        Self {
            message: "Student created successfully".to_string(),
            id: student.id,
            student,
        }
    }
}

/// Response for a successful update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdatedResponse {
    /// Confirmation message.
    pub message: String,

    /// Number of rows changed.
    pub changes: u64,

    /// The record as now stored.
    pub updated_student: UpdatedStudent,
}

impl StudentUpdatedResponse {
    /// Build an update response. `raw_id` is the id as given in the request path.
    #[must_use]
    pub fn new(raw_id: &str, changes: u64, student: Student) -> Self {
        let Student {
            firstname,
            lastname,
            gender,
            age,
            ..
        } = student;

        Self {
            message: format!("Student with id: {raw_id} updated successfully"),
            changes,
            updated_student: UpdatedStudent {
                id: raw_id.to_string(),
                firstname,
                lastname,
                gender,
                age,
            },
        }
    }
}

/// Updated record, keyed by the id as it appeared in the request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedStudent {
    /// Id as given in the request path.
    pub id: String,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Gender.
    pub gender: String,
    /// Age, `None` when cleared.
    pub age: Option<String>,
}

/// Response for a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDeletedResponse {
    /// Confirmation message.
    pub message: String,

    /// Number of rows removed.
    pub changes: u64,
}

impl StudentDeletedResponse {
    /// Build a delete response. `id` is the id as given in the request path.
    #[must_use]
    pub fn new(id: &str, changes: u64) -> Self {
        Self {
            message: format!("Student with id: {id} deleted successfully"),
            changes,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,

    /// Service version.
    pub version: String,
}

/// Readiness check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// Overall readiness status.
    pub ready: bool,

    /// Individual component statuses.
    pub components: ReadyComponents,
}

/// Component readiness statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyComponents {
    /// Storage backend status.
    pub storage: bool,
}
