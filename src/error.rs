//! Error types for step construction, lookup and copying.
//!
//! Every fallible operation in this crate returns [`StepError`]. Errors are
//! reported at the call that detected them; nothing is retried or swallowed.
//!
//! # Examples
//!
//! ```rust
//! use stepchain::{StepError, ValidationSteps};
//!
//! let steps = ValidationSteps::new();
//! match steps.is_step_valid(7) {
//!     Err(StepError::NotFound { number }) => assert_eq!(number, 7),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use std::fmt;

/// Error returned by step operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// A step number was negative.
    OutOfRange {
        /// The rejected step number.
        number: i32,
    },
    /// No step with the requested number exists.
    NotFound {
        /// The requested step number.
        number: i32,
    },
    /// A copy target start index lies past the end of the target.
    IndexOutOfRange {
        /// The requested start index.
        index: usize,
        /// Length of the target slice.
        len: usize,
    },
    /// A copy target has too little room after the start index.
    InsufficientSpace {
        /// Number of slots the copy needs.
        needed: usize,
        /// Number of slots available after the start index.
        available: usize,
    },
}

impl StepError {
    /// Create an out-of-range error for a negative step number.
    pub fn out_of_range(number: i32) -> Self {
        Self::OutOfRange { number }
    }

    /// Create a not-found error for a missing step number.
    pub fn not_found(number: i32) -> Self {
        Self::NotFound { number }
    }

    /// Returns true if this is an out-of-range error.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    /// Returns true if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The step number the error refers to, if any.
    pub fn number(&self) -> Option<i32> {
        match self {
            Self::OutOfRange { number } | Self::NotFound { number } => Some(*number),
            Self::IndexOutOfRange { .. } | Self::InsufficientSpace { .. } => None,
        }
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { number } => {
                write!(f, "step number {} is out of range, must be >= 0", number)
            }
            Self::NotFound { number } => write!(f, "step with Number={} not found", number),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {} is out of range for target of length {}", index, len)
            }
            Self::InsufficientSpace { needed, available } => write!(
                f,
                "target has room for {} steps after the index, {} needed",
                available, needed
            ),
        }
    }
}

impl std::error::Error for StepError {}

/// Reject negative step numbers.
pub(crate) fn ensure_step_number(number: i32) -> Result<i32, StepError> {
    if number < 0 {
        Err(StepError::out_of_range(number))
    } else {
        Ok(number)
    }
}
