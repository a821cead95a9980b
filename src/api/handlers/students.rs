//! Student CRUD handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::state::AppState;
use crate::domain::{
    Student, StudentCreatedResponse, StudentDeletedResponse, StudentListResponse,
    StudentPayload, StudentUpdatedResponse,
};
use crate::error::Result;

/// List all students.
///
/// # Errors
///
/// Returns an error if storage fails.
pub async fn list_students(State(state): State<AppState>) -> Result<Json<StudentListResponse>> {
    let students = state.student_service.list().await?;
    Ok(Json(StudentListResponse::new(students)))
}

/// Create a student from a JSON or form body.
///
/// # Errors
///
/// Returns an error if the body is empty, a required field is missing, or storage fails.
pub async fn create_student(
    State(state): State<AppState>,
    payload: StudentPayload,
) -> Result<(StatusCode, Json<StudentCreatedResponse>)> {
    let student = state.student_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(StudentCreatedResponse::new(student)),
    ))
}

/// Get one student.
///
/// # Errors
///
/// Returns an error if no student has this id or storage fails.
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>> {
    let student = state.student_service.get(&id).await?;
    Ok(Json(student))
}

/// Overwrite every field of a student.
///
/// # Errors
///
/// Returns an error if the body is invalid, no student has this id, or storage fails.
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: StudentPayload,
) -> Result<Json<StudentUpdatedResponse>> {
    let (changes, student) = state.student_service.update(&id, payload).await?;
    Ok(Json(StudentUpdatedResponse::new(&id, changes, student)))
}

/// Delete a student.
///
/// # Errors
///
/// Returns an error if no student has this id or storage fails.
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentDeletedResponse>> {
    let (_, changes) = state.student_service.delete(&id).await?;
    Ok(Json(StudentDeletedResponse::new(&id, changes)))
}
