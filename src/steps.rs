//! Chained validation steps
//!
//! [`ValidationSteps`] owns a [`StepCollection`] and answers validity and
//! message queries under a [`ValidationPolicy`].
//!
//! Under [`ValidationPolicy::Sequential`] (the default), a step is valid only
//! if its own check holds and the nearest lower-numbered step is valid, which
//! recursively covers every step below it. Numbers may have gaps: the
//! predecessor of step 5 in `{1, 5}` is step 1. Under
//! [`ValidationPolicy::Independent`] every step stands alone.
//!
//! # Examples
//!
//! ```rust
//! use stepchain::ValidationSteps;
//!
//! let mut steps = ValidationSteps::new();
//! steps.add(1, || true).unwrap();
//! steps.add_with_message(2, || false, || "email is missing".to_string()).unwrap();
//! steps.add(3, || true).unwrap();
//!
//! assert_eq!(steps.is_step_valid(1), Ok(true));
//! assert_eq!(steps.is_step_valid(2), Ok(false));
//! // Step 3 passes on its own but step 2 failed upstream.
//! assert_eq!(steps.is_step_valid(3), Ok(false));
//!
//! steps.set_sequential_validation(false);
//! assert_eq!(steps.is_step_valid(3), Ok(true));
//!
//! assert_eq!(steps.step_validation_message(2, false).unwrap(), "email is missing");
//! assert_eq!(steps.step_validation_message(3, false).unwrap(), "");
//! ```

use crate::check::{Check, Message};
use crate::collection::{Iter, StepCollection};
use crate::error::{ensure_step_number, StepError};
use crate::step::ValidationStep;
use crate::validation::Validation;

/// How a step's validity relates to the steps numbered below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationPolicy {
    /// A step is valid only if every lower-numbered step is valid too.
    #[default]
    Sequential,
    /// Each step is judged by its own check alone.
    Independent,
}

/// An invalid step found by [`ValidationSteps::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StepFailure {
    /// Number of the failing step.
    pub number: i32,
    /// The step's own message at the time of evaluation.
    pub message: String,
}

/// Evaluation result of one step, as listed in a [`StepReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StepOutcome {
    /// Step number.
    pub number: i32,
    /// Validity under the policy in force when the report was taken.
    pub valid: bool,
    /// The step's message when invalid, empty otherwise.
    pub message: String,
}

/// Snapshot of every step's validity, ascending by number.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StepReport {
    /// Policy the outcomes were computed under.
    pub policy: ValidationPolicy,
    /// One outcome per step.
    pub outcomes: Vec<StepOutcome>,
}

impl StepReport {
    /// Whether every step was valid. An empty report is valid.
    pub fn all_valid(&self) -> bool {
        self.outcomes.iter().all(|o| o.valid)
    }

    /// Outcomes of the invalid steps.
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes.iter().filter(|o| !o.valid)
    }
}

/// An ordered set of validation steps with a chaining policy.
#[derive(Debug, Clone, Default)]
pub struct ValidationSteps {
    steps: StepCollection,
    policy: ValidationPolicy,
}

impl ValidationSteps {
    /// Create an empty set using sequential validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set using `policy`.
    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Self {
            steps: StepCollection::new(),
            policy,
        }
    }

    /// Create a set seeded from `steps`.
    ///
    /// Later steps whose number is already taken are ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stepchain::{ValidationStep, ValidationSteps};
    ///
    /// let steps = ValidationSteps::from_steps(vec![
    ///     ValidationStep::new(2, || true).unwrap(),
    ///     ValidationStep::new(2, || false).unwrap(),
    /// ]);
    /// assert_eq!(steps.len(), 1);
    /// assert_eq!(steps.is_step_valid(2), Ok(true));
    /// ```
    pub fn from_steps<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = ValidationStep>,
    {
        let mut this = Self::new();
        this.extend(steps);
        this
    }

    /// Current policy.
    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Replace the policy.
    pub fn set_policy(&mut self, policy: ValidationPolicy) {
        self.policy = policy;
    }

    /// Whether sequential validation is on.
    pub fn sequential_validation(&self) -> bool {
        self.policy == ValidationPolicy::Sequential
    }

    /// Switch sequential validation on or off.
    pub fn set_sequential_validation(&mut self, sequential: bool) {
        self.policy = if sequential {
            ValidationPolicy::Sequential
        } else {
            ValidationPolicy::Independent
        };
    }

    /// Add a step with an empty message.
    ///
    /// Fails with [`StepError::OutOfRange`] for negative numbers. Adding a
    /// number that is already present leaves the existing step untouched.
    pub fn add<C>(&mut self, number: i32, check: C) -> Result<&mut Self, StepError>
    where
        C: Check + 'static,
    {
        self.add_step(ValidationStep::new(number, check)?)
    }

    /// Add a step with a message producer.
    pub fn add_with_message<C, M>(
        &mut self,
        number: i32,
        check: C,
        message: M,
    ) -> Result<&mut Self, StepError>
    where
        C: Check + 'static,
        M: Message + 'static,
    {
        self.add_step(ValidationStep::with_message(number, check, message)?)
    }

    /// Add an already built step.
    pub fn add_step(&mut self, step: ValidationStep) -> Result<&mut Self, StepError> {
        self.steps.add(step)?;
        Ok(self)
    }

    /// Remove the step with `number` and return it.
    ///
    /// Fails with [`StepError::NotFound`] if there is no such step.
    pub fn remove(&mut self, number: i32) -> Result<ValidationStep, StepError> {
        self.get_step(number)?;
        self.steps
            .take(number)?
            .ok_or_else(|| StepError::not_found(number))
    }

    /// Remove the step with the same number as `step`.
    pub fn remove_step(&mut self, step: &ValidationStep) -> Result<bool, StepError> {
        self.steps.remove(step)
    }

    /// Whether a step with the same number as `step` is present.
    pub fn contains(&self, step: &ValidationStep) -> Result<bool, StepError> {
        self.steps.contains(step)
    }

    /// Remove every step.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate over the steps in ascending number order.
    pub fn iter(&self) -> Iter<'_> {
        self.steps.iter()
    }

    /// The underlying collection.
    pub fn steps(&self) -> &StepCollection {
        &self.steps
    }

    /// Look up a step by number.
    ///
    /// Fails with [`StepError::OutOfRange`] for negative numbers and with
    /// [`StepError::NotFound`] if no step has `number`.
    pub fn get_step(&self, number: i32) -> Result<&ValidationStep, StepError> {
        let number = ensure_step_number(number)?;
        self.steps
            .get(number)
            .ok_or_else(|| StepError::not_found(number))
    }

    /// Whether the step with `number` is valid under the current policy.
    ///
    /// Under sequential validation the checks of the step's predecessors are
    /// run from the lowest number upward, stopping at the first failure; the
    /// step's own check only runs when all of them hold.
    pub fn is_step_valid(&self, number: i32) -> Result<bool, StepError> {
        let step = self.get_step(number)?;
        let valid = match self.policy {
            ValidationPolicy::Independent => step.is_valid(),
            ValidationPolicy::Sequential => self.chain_valid(step.number()),
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(number, valid, policy = ?self.policy, "step evaluated");
        Ok(valid)
    }

    fn chain_valid(&self, number: i32) -> bool {
        for step in self.steps.up_to(number) {
            if !step.is_valid() {
                #[cfg(feature = "tracing")]
                if step.number() != number {
                    tracing::trace!(number, failed = step.number(), "predecessor step failed");
                }
                return false;
            }
        }
        true
    }

    /// The message of the step with `number`.
    ///
    /// With `bypass_validation` the message is returned unconditionally.
    /// Otherwise it is returned only if the step's own check fails, and the
    /// empty string is returned if it holds. The policy is not consulted:
    /// a step that passes its own check yields no message even when an
    /// upstream step makes it invalid under sequential validation.
    pub fn step_validation_message(
        &self,
        number: i32,
        bypass_validation: bool,
    ) -> Result<String, StepError> {
        let step = self.get_step(number)?;
        if bypass_validation || !step.is_valid() {
            Ok(step.validation_message())
        } else {
            Ok(String::new())
        }
    }

    /// The lowest-numbered step whose own check fails.
    pub fn first_invalid(&self) -> Option<&ValidationStep> {
        self.steps.iter().find(|step| !step.is_valid())
    }

    /// Evaluate every step and collect the failures.
    ///
    /// Each step's own check runs exactly once. Under sequential validation
    /// every step at or after the first failing one is reported, each with
    /// its own message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stepchain::{StepFailure, Validation, ValidationSteps};
    ///
    /// let mut steps = ValidationSteps::new();
    /// steps.add_with_message(1, || false, || "first".to_string()).unwrap();
    /// steps.add_with_message(2, || true, || "second".to_string()).unwrap();
    ///
    /// let failures = steps.validate().into_result().unwrap_err();
    /// assert_eq!(failures.len(), 2);
    /// assert_eq!(failures[1], StepFailure { number: 2, message: "second".to_string() });
    /// ```
    pub fn validate(&self) -> Validation<(), Vec<StepFailure>> {
        let failures: Vec<StepFailure> = self
            .evaluate()
            .into_iter()
            .filter(|(_, valid)| !valid)
            .map(|(step, _)| StepFailure {
                number: step.number(),
                message: step.validation_message(),
            })
            .collect();

        if failures.is_empty() {
            Validation::success(())
        } else {
            Validation::failure(failures)
        }
    }

    /// Evaluate every step and record each outcome.
    pub fn report(&self) -> StepReport {
        let outcomes = self
            .evaluate()
            .into_iter()
            .map(|(step, valid)| StepOutcome {
                number: step.number(),
                valid,
                message: if valid {
                    String::new()
                } else {
                    step.validation_message()
                },
            })
            .collect();

        StepReport {
            policy: self.policy,
            outcomes,
        }
    }

    fn evaluate(&self) -> Vec<(&ValidationStep, bool)> {
        let mut upstream_valid = true;
        self.steps
            .iter()
            .map(|step| {
                let own = step.is_valid();
                let valid = match self.policy {
                    ValidationPolicy::Independent => own,
                    ValidationPolicy::Sequential => {
                        upstream_valid = upstream_valid && own;
                        upstream_valid
                    }
                };
                (step, valid)
            })
            .collect()
    }
}

impl FromIterator<ValidationStep> for ValidationSteps {
    fn from_iter<I: IntoIterator<Item = ValidationStep>>(iter: I) -> Self {
        Self::from_steps(iter)
    }
}

impl Extend<ValidationStep> for ValidationSteps {
    fn extend<I: IntoIterator<Item = ValidationStep>>(&mut self, iter: I) {
        for step in iter {
            let _ = self.steps.add(step);
        }
    }
}

impl<'a> IntoIterator for &'a ValidationSteps {
    type Item = &'a ValidationStep;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
