//! Error extension utilities
//!
//! Converts foreign errors into [`wirekit_domain::Error`] with a context
//! message. Producers and constructors wrapping fallible code use
//! `producer_context`; configuration loading uses `config_context` and
//! `io_context`.

use std::fmt;

use wirekit_domain::{Error, Result};

/// Extension trait for adding context to errors
///
/// # Example
///
/// ```ignore
/// use wirekit::error_ext::ErrorContext;
///
/// container.bind("Port", Concrete::producer(|_, _| {
///     let port: u16 = std::env::var("PORT")
///         .producer_context("PORT is not set")?
///         .parse()
///         .producer_context("PORT is not a number")?;
///     Ok(Instance::new(port))
/// }))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context for producer and constructor failures
    fn producer_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Add context with lazy evaluation for expensive context creation
    fn with_producer_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;

    /// Add context for I/O operations
    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Add context for configuration operations
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn producer_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|err| Error::producer_with_source(format!("{context}: {err}"), err))
    }

    fn with_producer_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|err| Error::producer_with_source(format!("{}: {err}", f()), err))
    }

    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|err| Error::io_with_source(format!("{context}: {err}"), err))
    }

    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|err| Error::configuration_with_source(format!("{context}: {err}"), err))
    }
}
