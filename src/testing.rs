//! Testing utilities for code built on validation steps
//!
//! Assertion macros for step validity and [`Validation`](crate::Validation)
//! outcomes, and with the `proptest` feature, strategies for generating step
//! numbers and step sets.
//!
//! # Examples
//!
//! ```rust
//! use stepchain::{ValidationSteps, assert_step_valid, assert_step_invalid, assert_failure};
//!
//! let mut steps = ValidationSteps::new();
//! steps.add(1, || true).unwrap();
//! steps.add(2, || false).unwrap();
//!
//! assert_step_valid!(steps, 1);
//! assert_step_invalid!(steps, 2);
//! assert_failure!(steps.validate());
//! ```

/// Assert that a step exists and is valid under the current policy.
///
/// Panics if the step is invalid or if the lookup fails.
#[macro_export]
macro_rules! assert_step_valid {
    ($steps:expr, $number:expr) => {
        match $steps.is_step_valid($number) {
            Ok(true) => {}
            Ok(false) => panic!("Expected step {} to be valid, got invalid", $number),
            Err(e) => panic!("Expected step {} to be valid, got error: {}", $number, e),
        }
    };
}

/// Assert that a step exists and is invalid under the current policy.
///
/// Panics if the step is valid or if the lookup fails.
#[macro_export]
macro_rules! assert_step_invalid {
    ($steps:expr, $number:expr) => {
        match $steps.is_step_valid($number) {
            Ok(false) => {}
            Ok(true) => panic!("Expected step {} to be invalid, got valid", $number),
            Err(e) => panic!("Expected step {} to be invalid, got error: {}", $number, e),
        }
    };
}

/// Assert that a validation succeeds.
///
/// ```rust
/// use stepchain::{Validation, assert_success};
///
/// assert_success!(Validation::<_, Vec<String>>::success(42));
/// ```
#[macro_export]
macro_rules! assert_success {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Success(_) => {}
            $crate::Validation::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
}

/// Assert that a validation fails.
#[macro_export]
macro_rules! assert_failure {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Failure(_) => {}
            $crate::Validation::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

#[cfg(feature = "proptest")]
pub use strategies::*;

#[cfg(feature = "proptest")]
mod strategies {
    use proptest::prelude::*;

    use crate::step::ValidationStep;
    use crate::steps::ValidationSteps;

    /// Any valid step number.
    pub fn step_number() -> impl Strategy<Value = i32> {
        0..=i32::MAX
    }

    /// Any step number that construction rejects.
    pub fn negative_step_number() -> impl Strategy<Value = i32> {
        i32::MIN..0
    }

    /// A step with a fixed outcome and a message naming its number.
    pub fn fixed_step(number: i32, valid: bool) -> ValidationStep {
        let built = ValidationStep::with_message(number, move || valid, move || {
            format!("step {} failed", number)
        });
        match built {
            Ok(step) => step,
            Err(e) => panic!("fixed_step called with a bad number: {}", e),
        }
    }

    /// Step sets of up to `max_len` steps with small numbers and fixed outcomes.
    ///
    /// Numbers are drawn from `0..64`, so duplicates are likely and exercise
    /// the keep-first rule.
    pub fn steps_with_outcomes(max_len: usize) -> impl Strategy<Value = Vec<(i32, bool)>> {
        prop::collection::vec((0i32..64, any::<bool>()), 0..=max_len)
    }

    /// Build a [`ValidationSteps`] from generated `(number, valid)` pairs.
    pub fn build_steps(pairs: &[(i32, bool)]) -> ValidationSteps {
        pairs
            .iter()
            .map(|&(number, valid)| fixed_step(number, valid))
            .collect()
    }
}
