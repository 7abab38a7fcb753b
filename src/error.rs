//! Operation-level error types.

use thiserror::Error;

use crate::models::MemberId;
use crate::validation::ValidationError;

/// Failure of a generation run for one duty type.
///
/// Other duty types in the same batch are unaffected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("invalid input for duty type {duty_type_id}: {}", join(.errors))]
    InvalidInput {
        duty_type_id: String,
        errors: Vec<ValidationError>,
    },
}

/// Rejection of a manual single-slot assignment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManualAssignError {
    #[error("assignment is locked to {assignee_id}")]
    Locked { assignee_id: MemberId },

    #[error("assignee {0} is not a group member")]
    NotMember(MemberId),

    #[error("invalid time range: {0}")]
    InvalidTimeRange(String),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
