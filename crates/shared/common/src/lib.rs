//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling for forms, HTTP and local storage
//! - Helpers to pull a human-readable message out of error bodies

pub mod error;

pub use error::{extract_message, AppError, AppResult, FieldErrors, GENERIC_FAILURE_MESSAGE};
