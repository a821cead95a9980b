//! Student record types.

use serde::{Deserialize, Serialize};

/// Primary key of a student row.
pub type StudentId = i64;

/// A persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    /// Row key, assigned by storage on insert.
    pub id: StudentId,

    /// First name (never empty).
    pub firstname: String,

    /// Last name (never empty).
    pub lastname: String,

    /// Gender (never empty).
    pub gender: String,

    /// Free-form age, stored as text.
    pub age: Option<String>,
}

impl Student {
    /// Attach a row key to validated input.
    #[must_use]
    pub fn from_input(id: StudentId, input: StudentInput) -> Self {
        let StudentInput {
            firstname,
            lastname,
            gender,
            age,
        } = input;

        Self {
            id,
            firstname,
            lastname,
            gender,
            age,
        }
    }
}

/// Validated field values for an insert or a full overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentInput {
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Gender.
    pub gender: String,
    /// Optional age.
    pub age: Option<String>,
}

/// Parse a path segment into a row key.
///
/// Returns `None` when the segment cannot name any row.
#[must_use]
pub fn parse_student_id(raw: &str) -> Option<StudentId> {
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_student_id() {
        assert_eq!(parse_student_id("1"), Some(1));
        assert_eq!(parse_student_id("42"), Some(42));
        assert_eq!(parse_student_id("abc"), None);
        assert_eq!(parse_student_id(""), None);
        assert_eq!(parse_student_id(" 1"), None);
    }

    #[test]
    fn test_student_serializes_null_age() {
        let student = Student {
            id: 3,
            firstname: "Jane".to_string(),
            lastname: "Doe".to_string(),
            gender: "female".to_string(),
            age: None,
        };

        let value = serde_json::to_value(&student).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["firstname"], "Jane");
        assert!(value["age"].is_null());
    }
}
