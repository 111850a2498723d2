//! # Stepchain
//!
//! Numbered validation steps that can be checked on their own or as a chain.
//!
//! Each [`ValidationStep`] pairs a non-negative number with a check closure
//! and a message closure. Both are evaluated lazily, on every query, so a
//! step always reflects the current state of whatever it inspects.
//! [`ValidationSteps`] keeps steps ordered by number and decides validity
//! under a [`ValidationPolicy`]: sequentially, where a step also needs every
//! lower-numbered step to pass, or independently.
//!
//! ## Quick Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use stepchain::ValidationSteps;
//!
//! #[derive(Default)]
//! struct Form {
//!     name: String,
//!     email: String,
//! }
//!
//! let form = Rc::new(RefCell::new(Form::default()));
//! let mut steps = ValidationSteps::new();
//!
//! let f = Rc::clone(&form);
//! steps.add_with_message(1, move || !f.borrow().name.is_empty(), || "name is required".to_string())?;
//! let f = Rc::clone(&form);
//! steps.add_with_message(2, move || f.borrow().email.contains('@'), || "email is invalid".to_string())?;
//!
//! assert!(!steps.is_step_valid(2)?);
//! assert_eq!(steps.step_validation_message(1, false)?, "name is required");
//!
//! form.borrow_mut().name = "Ada".into();
//! form.borrow_mut().email = "ada@example.com".into();
//! assert!(steps.is_step_valid(2)?);
//! assert!(steps.validate().is_success());
//! # Ok::<(), stepchain::StepError>(())
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events when steps are added, skipped as
//!   duplicates, removed, and evaluated.
//! - `serde`: `Serialize` for [`StepReport`], [`StepOutcome`],
//!   [`StepFailure`], [`ValidationPolicy`] and [`Validation`].
//! - `proptest`: strategies in [`testing`] for property tests.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod check;
pub mod collection;
pub mod error;
pub mod step;
pub mod steps;
pub mod testing;
pub mod validation;

// Re-exports
pub use check::{Check, Message};
pub use collection::StepCollection;
pub use error::StepError;
pub use step::ValidationStep;
pub use steps::{StepFailure, StepOutcome, StepReport, ValidationPolicy, ValidationSteps};
pub use validation::Validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::check::{Check, Message};
    pub use crate::collection::StepCollection;
    pub use crate::error::StepError;
    pub use crate::step::ValidationStep;
    pub use crate::steps::{StepFailure, StepReport, ValidationPolicy, ValidationSteps};
    pub use crate::validation::Validation;
}
