//! Service layer module.
//!
//! Business logic sitting between the HTTP handlers and storage.

pub mod student;

pub use student::StudentService;
