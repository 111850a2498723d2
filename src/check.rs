//! Deferred evaluation traits for step checks and messages
//!
//! A step stores its check and message as trait objects and calls them on
//! every access. Both traits are blanket-implemented for closures, so plain
//! `|| bool` and `|| String` closures can be used directly.
//!
//! # Example
//!
//! ```rust
//! use stepchain::check::{Check, Message};
//!
//! let always = || true;
//! assert!(always.check());
//!
//! let msg = || String::from("name is required");
//! assert_eq!(msg.message(), "name is required");
//! ```

/// A zero-argument check producing a boolean.
///
/// Results are never cached; each call re-runs the check.
pub trait Check {
    /// Run the check.
    fn check(&self) -> bool;
}

impl<F> Check for F
where
    F: Fn() -> bool,
{
    #[inline]
    fn check(&self) -> bool {
        self()
    }
}

/// A zero-argument producer of a human-readable failure message.
pub trait Message {
    /// Produce the message.
    fn message(&self) -> String;
}

impl<F> Message for F
where
    F: Fn() -> String,
{
    #[inline]
    fn message(&self) -> String {
        self()
    }
}

/// Message used when a step is built without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyMessage;

impl Message for EmptyMessage {
    #[inline]
    fn message(&self) -> String {
        String::new()
    }
}
