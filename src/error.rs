//! Error types for the HR workflow engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during policy evaluation,
//! lifecycle transitions and configuration loading.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the HR workflow engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use hr_engine::error::HrError;
///
/// let error = HrError::InsufficientBalance {
///     requested: 5,
///     remaining: 2,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Insufficient leave balance: requested 5 days, 2 remaining"
/// );
/// ```
#[derive(Debug, Error)]
pub enum HrError {
    /// Input failed validation before any state was touched.
    #[error("Validation failed for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: &'static str,
        /// A description of the validation failure.
        message: String,
    },

    /// The access policy denied the action.
    ///
    /// Deliberately carries no resource detail so that unauthorized callers
    /// cannot learn whether the resource exists.
    #[error("Not permitted")]
    PermissionDenied,

    /// The requested status is not reachable from the entity's current status.
    #[error("Invalid transition for {entity}: {from} -> {to}")]
    InvalidTransition {
        /// The kind of entity the transition was requested on.
        entity: &'static str,
        /// The entity's current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// A check-in or check-out already exists for the (employee, date) pair.
    #[error("{event} already recorded for employee {employee} on {date}")]
    AlreadyRecorded {
        /// The attendance event that was already recorded.
        event: &'static str,
        /// The employee the record belongs to.
        employee: Uuid,
        /// The attendance date.
        date: NaiveDate,
    },

    /// A leave approval would overdraw the employee's balance.
    #[error("Insufficient leave balance: requested {requested} days, {remaining} remaining")]
    InsufficientBalance {
        /// The duration of the leave request in days.
        requested: u32,
        /// The days remaining on the balance.
        remaining: u32,
    },

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was looked up.
        entity: &'static str,
        /// The identifier that was not found.
        id: String,
    },

    /// A record violating a uniqueness constraint was inserted.
    #[error("Duplicate {entity}: {key}")]
    Duplicate {
        /// The kind of entity the constraint belongs to.
        entity: &'static str,
        /// A description of the conflicting key.
        key: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Invalid configuration '{path}': {message}")]
    ConfigInvalid {
        /// The path to the offending file.
        path: String,
        /// A description of the parse or validation error.
        message: String,
    },
}

/// A type alias for Results that return [`HrError`].
pub type HrResult<T> = Result<T, HrError>;
