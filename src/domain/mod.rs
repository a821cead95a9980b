//! Domain models for the students API.
//!
//! This module contains the student record type and the API request/response
//! contracts built around it.

pub mod dto;
pub mod student;

pub use dto::{
    HealthResponse, OPTIONAL_FIELDS, PayloadError, REQUIRED_FIELDS, ReadyComponents,
    ReadyResponse, StudentCreatedResponse, StudentDeletedResponse, StudentListResponse,
    StudentPayload, StudentUpdatedResponse, UpdatedStudent, WriteOperation,
};
pub use student::{Student, StudentId, StudentInput, parse_student_id};
