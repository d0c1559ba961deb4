//! Errors carried through streams and raised by the engine itself.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;


/// Shorthand for results whose error is the crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;


/// An error of the stream engine.
///
/// Errors produced by upstream data or operator logic travel downstream as an
/// `on_error` notification. Contract violations by calling code (such as
/// assigning a cancellation slot twice) are returned synchronously instead.
///
/// The type is cheap to clone, so a single failure can be fanned out to every
/// observer of a multicast source.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A single-assignment slot was assigned a second time.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    /// An argument passed to a public entry point was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Checked arithmetic inside an aggregate overflowed.
    #[error("arithmetic operation resulted in an overflow")]
    Overflow,
    /// The source completed without the element an operator required.
    #[error("sequence contains no elements")]
    NoElements,
    /// A failure raised by user code.
    #[error("{0}")]
    Custom(Arc<dyn StdError + Send + Sync + 'static>),
}

impl Error {
    /// Wrap an arbitrary error so it can travel through a stream.
    ///
    /// ```
    /// # use reagent::Error;
    /// use std::io;
    /// let error = Error::custom(io::Error::new(io::ErrorKind::Other, "boom"));
    /// assert_eq!(error.to_string(), "boom");
    /// ```
    pub fn custom<E>(error: E) -> Error
        where E: StdError + Send + Sync + 'static,
    {
        Error::Custom(Arc::new(error))
    }
}

/// Two custom errors are equal only if they share the same allocation.
impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        match (self, other) {
            (Error::InvalidState(a), Error::InvalidState(b)) => a == b,
            (Error::InvalidArgument(a), Error::InvalidArgument(b)) => a == b,
            (Error::Overflow, Error::Overflow) => true,
            (Error::NoElements, Error::NoElements) => true,
            (Error::Custom(a), Error::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
