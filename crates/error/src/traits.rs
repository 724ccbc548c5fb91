//! # Error Traits
//!
//! Context extensions for results whose error converts into [`AppError`].

use crate::{AppError, Result};

/// Prefix the error of a result with what was being attempted.
///
/// The error's variant and retryable flag are preserved.
pub trait ResultExt<T> {
    fn context<C: ToString>(self, context: C) -> Result<T>;

    /// Like [`ResultExt::context`], building the message only on error.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: ToString,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn context<C: ToString>(self, context: C) -> Result<T> { self.map_err(|e| e.into().context(context)) }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: ToString,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().context(f()))
    }
}
