//! Accumulating validation outcome
//!
//! [`Validation`] is like `Result`, but its failure side is meant to carry
//! every problem found rather than the first one. [`ValidationSteps::validate`]
//! returns one, with a [`StepFailure`] per invalid step.
//!
//! [`ValidationSteps::validate`]: crate::ValidationSteps::validate
//! [`StepFailure`]: crate::StepFailure
//!
//! # Examples
//!
//! ```
//! use stepchain::Validation;
//!
//! let ok = Validation::<_, Vec<&str>>::success(42);
//! let bad = Validation::<i32, _>::failure(vec!["too small", "not even"]);
//!
//! assert!(ok.is_success());
//! assert_eq!(bad.into_result(), Err(vec!["too small", "not even"]));
//! ```

/// A validation that either succeeds with a value or fails with accumulated errors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Validation<T, E> {
    /// Successful validation with a value
    Success(T),
    /// Failed validation with accumulated errors
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Create a successful validation
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Create a failed validation
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// Create a validation from a Result
    ///
    /// ```
    /// use stepchain::Validation;
    ///
    /// let v = Validation::from_result(Err::<i32, _>("error"));
    /// assert_eq!(v, Validation::Failure("error"));
    /// ```
    #[inline]
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Validation::Success(value),
            Err(error) => Validation::Failure(error),
        }
    }

    /// Convert this validation to a Result
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(error) => Err(error),
        }
    }

    /// Check if this validation is successful
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// Check if this validation failed
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// Transform the success value if present
    ///
    /// ```
    /// use stepchain::Validation;
    ///
    /// let v = Validation::<_, String>::success(5).map(|x| x * 2);
    /// assert_eq!(v, Validation::Success(10));
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// Transform the errors if present
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Validation<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(error) => Validation::Failure(f(error)),
        }
    }
}

impl<T, E> From<Validation<T, E>> for Result<T, E> {
    fn from(validation: Validation<T, E>) -> Self {
        validation.into_result()
    }
}
