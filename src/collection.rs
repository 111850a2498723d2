//! Ordered, deduplicated storage for validation steps
//!
//! [`StepCollection`] keeps steps keyed by number and always iterates in
//! ascending order. Adding a step whose number is already present leaves the
//! existing step in place.
//!
//! # Examples
//!
//! ```rust
//! use stepchain::{StepCollection, ValidationStep};
//!
//! let mut steps = StepCollection::new();
//! steps.add(ValidationStep::new(5, || true).unwrap()).unwrap();
//! steps.add(ValidationStep::new(1, || true).unwrap()).unwrap();
//! steps.add(ValidationStep::new(3, || true).unwrap()).unwrap();
//!
//! let numbers: Vec<i32> = steps.iter().map(|s| s.number()).collect();
//! assert_eq!(numbers, vec![1, 3, 5]);
//! ```

use std::collections::btree_map::{self, BTreeMap, Entry};

use crate::error::{ensure_step_number, StepError};
use crate::step::ValidationStep;

/// Steps keyed by number, iterated in ascending order.
#[derive(Debug, Clone, Default)]
pub struct StepCollection {
    steps: BTreeMap<i32, ValidationStep>,
}

impl StepCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step unless one with the same number is already present.
    ///
    /// Returns `Ok(true)` if the step was inserted and `Ok(false)` if the
    /// number was taken, in which case the existing step is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stepchain::{StepCollection, ValidationStep};
    ///
    /// let mut steps = StepCollection::new();
    /// assert_eq!(steps.add(ValidationStep::new(1, || true).unwrap()), Ok(true));
    /// assert_eq!(steps.add(ValidationStep::new(1, || false).unwrap()), Ok(false));
    /// assert!(steps.get(1).unwrap().is_valid());
    /// ```
    pub fn add(&mut self, step: ValidationStep) -> Result<bool, StepError> {
        let number = ensure_step_number(step.number())?;
        match self.steps.entry(number) {
            Entry::Vacant(slot) => {
                slot.insert(step);
                #[cfg(feature = "tracing")]
                tracing::trace!(number, "step added");
                Ok(true)
            }
            Entry::Occupied(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(number, "step number already present, keeping existing step");
                Ok(false)
            }
        }
    }

    /// Remove the step with the same number as `step`.
    ///
    /// Returns `Ok(false)` if no such step exists.
    pub fn remove(&mut self, step: &ValidationStep) -> Result<bool, StepError> {
        Ok(self.take(step.number())?.is_some())
    }

    /// Remove and return the step with `number`, if present.
    pub(crate) fn take(&mut self, number: i32) -> Result<Option<ValidationStep>, StepError> {
        let number = ensure_step_number(number)?;
        let removed = self.steps.remove(&number);
        #[cfg(feature = "tracing")]
        if removed.is_some() {
            tracing::trace!(number, "step removed");
        }
        Ok(removed)
    }

    /// Remove every step.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Whether a step with the same number as `step` is present.
    ///
    /// Only the number is compared, not the step's closures.
    pub fn contains(&self, step: &ValidationStep) -> Result<bool, StepError> {
        let number = ensure_step_number(step.number())?;
        Ok(self.steps.contains_key(&number))
    }

    /// Look up a step by number.
    pub fn get(&self, number: i32) -> Option<&ValidationStep> {
        self.steps.get(&number)
    }

    /// The step with the greatest number strictly below `number`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stepchain::{StepCollection, ValidationStep};
    ///
    /// let mut steps = StepCollection::new();
    /// steps.add(ValidationStep::new(1, || true).unwrap()).unwrap();
    /// steps.add(ValidationStep::new(5, || true).unwrap()).unwrap();
    ///
    /// assert_eq!(steps.previous(5).map(|s| s.number()), Some(1));
    /// assert!(steps.previous(1).is_none());
    /// ```
    pub fn previous(&self, number: i32) -> Option<&ValidationStep> {
        self.steps.range(..number).next_back().map(|(_, step)| step)
    }

    /// Steps numbered up to and including `number`, ascending.
    pub(crate) fn up_to(&self, number: i32) -> impl Iterator<Item = &ValidationStep> {
        self.steps.range(..=number).map(|(_, step)| step)
    }

    /// Copy the steps, ascending, into `target` starting at `index`.
    ///
    /// Fails if `index` is past the end of `target` or if fewer than
    /// [`len`](Self::len) slots remain after it. On failure `target` is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stepchain::{StepCollection, ValidationStep};
    ///
    /// let mut steps = StepCollection::new();
    /// steps.add(ValidationStep::new(2, || true).unwrap()).unwrap();
    /// steps.add(ValidationStep::new(1, || true).unwrap()).unwrap();
    ///
    /// let mut target = vec![None, None, None];
    /// steps.copy_to(&mut target, 1).unwrap();
    ///
    /// assert!(target[0].is_none());
    /// assert_eq!(target[1].as_ref().map(|s| s.number()), Some(1));
    /// assert_eq!(target[2].as_ref().map(|s| s.number()), Some(2));
    /// ```
    pub fn copy_to(
        &self,
        target: &mut [Option<ValidationStep>],
        index: usize,
    ) -> Result<(), StepError> {
        let len = target.len();
        if index > len {
            return Err(StepError::IndexOutOfRange { index, len });
        }
        let available = len - index;
        if available < self.steps.len() {
            return Err(StepError::InsufficientSpace {
                needed: self.steps.len(),
                available,
            });
        }
        for (slot, step) in target[index..].iter_mut().zip(self.steps.values()) {
            *slot = Some(step.clone());
        }
        Ok(())
    }

    /// Iterate over the steps in ascending number order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.steps.values(),
        }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the collection holds no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Always `false`; the collection can be mutated.
    pub fn is_read_only(&self) -> bool {
        false
    }
}

/// Ascending iterator over the steps of a [`StepCollection`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Values<'a, i32, ValidationStep>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ValidationStep;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a StepCollection {
    type Item = &'a ValidationStep;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(number: i32, valid: bool) -> ValidationStep {
        ValidationStep::new(number, move || valid).unwrap()
    }

    fn numbers(steps: &StepCollection) -> Vec<i32> {
        steps.iter().map(ValidationStep::number).collect()
    }

    #[test]
    fn test_iterates_ascending() {
        let mut steps = StepCollection::new();
        for n in [5, 1, 3] {
            steps.add(step(n, true)).unwrap();
        }
        assert_eq!(numbers(&steps), vec![1, 3, 5]);
        assert_eq!(steps.iter().rev().next().map(|s| s.number()), Some(5));
        assert_eq!(steps.iter().len(), 3);
    }

    #[test]
    fn test_duplicate_add_keeps_first() {
        let mut steps = StepCollection::new();
        assert_eq!(steps.add(step(1, true)), Ok(true));
        assert_eq!(steps.add(step(1, false)), Ok(false));

        assert_eq!(steps.len(), 1);
        assert!(steps.get(1).unwrap().is_valid());
    }

    #[test]
    fn test_remove() {
        let mut steps = StepCollection::new();
        let one = step(1, true);
        steps.add(one.clone()).unwrap();

        assert_eq!(steps.remove(&one), Ok(true));
        assert_eq!(steps.remove(&one), Ok(false));
        assert!(steps.is_empty());
    }

    #[test]
    fn test_contains_compares_number_only() {
        let mut steps = StepCollection::new();
        steps.add(step(4, true)).unwrap();

        assert_eq!(steps.contains(&step(4, false)), Ok(true));
        assert_eq!(steps.contains(&step(5, true)), Ok(false));
    }

    #[test]
    fn test_clear() {
        let mut steps = StepCollection::new();
        steps.add(step(1, true)).unwrap();
        steps.add(step(2, true)).unwrap();
        steps.clear();

        assert_eq!(steps.len(), 0);
        assert!(steps.iter().next().is_none());
    }

    #[test]
    fn test_previous_with_gaps() {
        let mut steps = StepCollection::new();
        for n in [1, 5, 9] {
            steps.add(step(n, true)).unwrap();
        }

        assert_eq!(steps.previous(9).map(ValidationStep::number), Some(5));
        assert_eq!(steps.previous(5).map(ValidationStep::number), Some(1));
        assert_eq!(steps.previous(4).map(ValidationStep::number), Some(1));
        assert!(steps.previous(1).is_none());
        assert!(steps.previous(0).is_none());
    }

    #[test]
    fn test_up_to_is_inclusive() {
        let mut steps = StepCollection::new();
        for n in [2, 4, 6] {
            steps.add(step(n, true)).unwrap();
        }

        let upto: Vec<i32> = steps.up_to(4).map(ValidationStep::number).collect();
        assert_eq!(upto, vec![2, 4]);
    }

    #[test]
    fn test_copy_to_at_offset() {
        let mut steps = StepCollection::new();
        steps.add(step(3, true)).unwrap();
        steps.add(step(1, true)).unwrap();

        let mut target: Vec<Option<ValidationStep>> = vec![None; 4];
        steps.copy_to(&mut target, 2).unwrap();

        let copied: Vec<Option<i32>> = target
            .iter()
            .map(|s| s.as_ref().map(ValidationStep::number))
            .collect();
        assert_eq!(copied, vec![None, None, Some(1), Some(3)]);
    }

    #[test]
    fn test_copy_to_rejects_bad_targets() {
        let mut steps = StepCollection::new();
        steps.add(step(1, true)).unwrap();
        steps.add(step(2, true)).unwrap();

        let mut target: Vec<Option<ValidationStep>> = vec![None; 2];
        assert_eq!(
            steps.copy_to(&mut target, 3),
            Err(StepError::IndexOutOfRange { index: 3, len: 2 })
        );
        assert_eq!(
            steps.copy_to(&mut target, 1),
            Err(StepError::InsufficientSpace {
                needed: 2,
                available: 1
            })
        );
        assert!(target.iter().all(Option::is_none));
    }

    #[test]
    fn test_copy_empty_collection_to_end() {
        let steps = StepCollection::new();
        let mut target: Vec<Option<ValidationStep>> = vec![None; 2];
        assert_eq!(steps.copy_to(&mut target, 2), Ok(()));
    }

    #[test]
    fn test_is_never_read_only() {
        assert!(!StepCollection::new().is_read_only());
    }

    #[test]
    fn test_take_rejects_negative() {
        let mut steps = StepCollection::new();
        assert_eq!(steps.take(-2).unwrap_err(), StepError::out_of_range(-2));
    }
}
