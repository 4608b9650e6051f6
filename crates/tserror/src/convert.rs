//! Conversions from foreign errors into the framework vocabulary.

use std::error::Error;
use std::io;

use crate::codes::ErrorCode;
use crate::error::TsError;
use crate::TsResult;

impl From<io::Error> for TsError {
    /// `?`-interop for filesystem-heavy sync operations: an `io::Error`
    /// becomes a `FileManagerError` with the cause snapshotted. Prefer
    /// [`ResultExt`] when the call site can name a better code or tag.
    fn from(err: io::Error) -> Self {
        TsError::compose(ErrorCode::FileManagerError, Some(&err), None, None)
    }
}

/// Extension trait for annotating any `Result` into [`TsResult`] during
/// propagation.
///
/// ```
/// use tserror::{ErrorCode, ResultExt, TsResult};
///
/// fn read_store() -> TsResult<Vec<u8>> {
///     std::fs::read("/no/such/store")
///         .err_context(ErrorCode::StoreFetchFailed, "tidesync::download::read_store")
/// }
///
/// let err = read_store().unwrap_err();
/// assert_eq!(err.code(), ErrorCode::StoreFetchFailed);
/// ```
pub trait ResultExt<T> {
    /// Wrap the error under the given code, snapshotting it as the cause.
    fn err_code(self, code: ErrorCode) -> TsResult<T>;

    /// Wrap the error under the given code with a caller tag.
    fn err_context(self, code: ErrorCode, context: &str) -> TsResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Error + 'static,
{
    fn err_code(self, code: ErrorCode) -> TsResult<T> {
        self.map_err(|e| {
            TsError::compose(code, Some(&e as &(dyn Error + 'static)), None, None)
        })
    }

    fn err_context(self, code: ErrorCode, context: &str) -> TsResult<T> {
        self.map_err(|e| {
            TsError::compose(code, Some(&e as &(dyn Error + 'static)), None, Some(context))
        })
    }
}
