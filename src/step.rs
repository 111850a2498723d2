//! A single numbered validation step
//!
//! A [`ValidationStep`] pairs a non-negative step number with a deferred check
//! and a deferred failure message. Neither is evaluated at construction; both
//! run again on every access.
//!
//! # Examples
//!
//! ```rust
//! use stepchain::ValidationStep;
//!
//! let step = ValidationStep::with_message(1, || false, || "name is required".to_string())
//!     .unwrap();
//!
//! assert_eq!(step.number(), 1);
//! assert!(!step.is_valid());
//! assert_eq!(step.validation_message(), "name is required");
//! assert_eq!(step.to_string(), "Step=1");
//! ```

use std::fmt;
use std::rc::Rc;

use crate::check::{Check, EmptyMessage, Message};
use crate::error::{ensure_step_number, StepError};

/// A numbered check with an optional failure message.
///
/// Cloning a step shares its closures; the clone evaluates exactly like the
/// original.
#[derive(Clone)]
pub struct ValidationStep {
    number: i32,
    check: Rc<dyn Check>,
    message: Rc<dyn Message>,
}

impl ValidationStep {
    /// Create a step whose message is the empty string.
    ///
    /// Fails with [`StepError::OutOfRange`] if `number` is negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stepchain::ValidationStep;
    ///
    /// let step = ValidationStep::new(0, || true).unwrap();
    /// assert!(step.is_valid());
    /// assert_eq!(step.validation_message(), "");
    ///
    /// assert!(ValidationStep::new(-1, || true).is_err());
    /// ```
    pub fn new<C>(number: i32, check: C) -> Result<Self, StepError>
    where
        C: Check + 'static,
    {
        Self::with_message(number, check, EmptyMessage)
    }

    /// Create a step with a message producer.
    ///
    /// Fails with [`StepError::OutOfRange`] if `number` is negative.
    pub fn with_message<C, M>(number: i32, check: C, message: M) -> Result<Self, StepError>
    where
        C: Check + 'static,
        M: Message + 'static,
    {
        let number = ensure_step_number(number)?;
        Ok(Self {
            number,
            check: Rc::new(check),
            message: Rc::new(message),
        })
    }

    /// The step number.
    #[inline]
    pub fn number(&self) -> i32 {
        self.number
    }

    /// Run this step's own check.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.check.check()
    }

    /// Produce this step's message.
    #[inline]
    pub fn validation_message(&self) -> String {
        self.message.message()
    }
}

impl fmt::Display for ValidationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step={}", self.number)
    }
}

impl fmt::Debug for ValidationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationStep")
            .field("number", &self.number)
            .finish_non_exhaustive()
    }
}
