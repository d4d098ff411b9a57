//! Temporal consistency validation
//!
//! Every edit to a draft record goes through [`RecordValidator`]. An edit is
//! either accepted, and the dependent derived fields are recomputed, or
//! rejected with a [`ValidationError`] and the record is left untouched.
//! [`finalize`] prepares an accepted draft for persistence.

pub mod finalize;
pub mod sequence;
pub mod validator;

use std::fmt;

use chrono::NaiveDate;

pub use finalize::{check_invariants, finalize, required_fields};
pub use sequence::{Collection, SequenceRule, check_chronological, check_positional};
pub use validator::RecordValidator;

/// Why an edit was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The date is on or before an entry it must follow, or on or after one it must precede
    OutOfOrderDate,
    /// A value the edit needs was not provided
    MissingRequiredField,
    /// An index, slot or count outside its allowed range
    InvalidRange,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfOrderDate => f.write_str("out-of-order date"),
            Self::MissingRequiredField => f.write_str("missing required field"),
            Self::InvalidRange => f.write_str("invalid range"),
        }
    }
}

/// Structured rejection of an edit
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} in {field}: {message}")]
pub struct ValidationError {
    /// Category of the failure
    pub kind: ErrorKind,
    /// Field or collection the edit targeted
    pub field: String,
    /// Existing date the new value conflicts with
    pub conflicting_date: Option<NaiveDate>,
    /// Human-readable explanation
    pub message: String,
}

impl ValidationError {
    /// Date conflicts with an existing entry
    pub fn out_of_order(
        field: impl Into<String>,
        conflicting_date: NaiveDate,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: ErrorKind::OutOfOrderDate,
            field: field.into(),
            conflicting_date: Some(conflicting_date),
            message: message.into(),
        }
    }

    /// Required value missing
    pub fn missing(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MissingRequiredField,
            field: field.into(),
            conflicting_date: None,
            message: message.into(),
        }
    }

    /// Index, slot or count out of range
    pub fn invalid_range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            field: field.into(),
            conflicting_date: None,
            message: message.into(),
        }
    }
}

/// Outcome of a validated edit as handed back to callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub accepted: bool,
    pub error: Option<ValidationError>,
}

impl Decision {
    /// Accepted edit
    #[must_use]
    pub const fn accept() -> Self {
        Self {
            accepted: true,
            error: None,
        }
    }

    /// Rejected edit
    #[must_use]
    pub const fn reject(error: ValidationError) -> Self {
        Self {
            accepted: false,
            error: Some(error),
        }
    }
}

impl<T> From<Result<T, ValidationError>> for Decision {
    fn from(result: Result<T, ValidationError>) -> Self {
        match result {
            Ok(_) => Self::accept(),
            Err(error) => Self::reject(error),
        }
    }
}
