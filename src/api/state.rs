//! Application state for Axum handlers.

use std::sync::Arc;

use crate::service::StudentService;
use crate::storage::traits::StudentStorage;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend.
    pub storage: Arc<dyn StudentStorage>,
    /// Student service.
    pub student_service: Arc<StudentService>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(storage: Arc<dyn StudentStorage>) -> Self {
        let student_service = Arc::new(StudentService::new(Arc::clone(&storage)));

        Self {
            storage,
            student_service,
        }
    }
}
