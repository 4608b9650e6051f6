//! # tserror — TideSync Error
//!
//! The error-construction layer of the TideSync framework: every failure
//! raised anywhere in the framework is a [`TsError`] with the same
//! inspectable shape, so logs and diagnostics look identical no matter
//! which subsystem produced them.
//!
//! ## Design
//!
//! A `TsError` carries three things:
//!
//! - the fixed framework domain, [`ERROR_DOMAIN`];
//! - an [`ErrorCode`] from the framework catalog;
//! - an [`ErrorInfo`] payload, an insertion-ordered map of diagnostic
//!   entries. Four keys are reserved and stable (`description`,
//!   `underlying-error`, `class-and-method`, `stack-trace`); everything
//!   else is free-form caller data. On a key collision the caller-supplied
//!   value always wins over the auto-derived one.
//!
//! An underlying cause is stored as a rendered *snapshot*, never as a live
//! reference, so chained errors from foreign domains cannot form ownership
//! cycles. `Display` dumps the entire payload — the terse "domain + code"
//! rendering a plain error type would give is exactly what this crate
//! exists to replace.
//!
//! ## Quick Start
//!
//! ```rust
//! use tserror::{ErrorCode, TsError, TsResult};
//!
//! fn least_recent_sync_date() -> TsResult<()> {
//!     Err(TsError::with_context(
//!         ErrorCode::FileManagerError,
//!         "tidesync::vacuum::least_recent_sync_date",
//!     ))
//! }
//!
//! let err = least_recent_sync_date().unwrap_err();
//! assert_eq!(err.code(), ErrorCode::FileManagerError);
//! assert_eq!(err.description(), "File Manager error");
//! println!("{err}");
//! ```
//!
//! Or let the [`ts_err!`] macro fill in the caller context:
//!
//! ```rust
//! use tserror::{ts_err, ErrorCode};
//!
//! let err = ts_err!(ErrorCode::StoreFetchFailed, { "path": "/store/docs" });
//! assert!(err.info().class_and_method().is_some());
//! ```
//!
//! ## Stack capture
//!
//! One process-wide switch controls whether constructions capture the
//! current call stack under the `stack-trace` key. It defaults to off and
//! is read (sequentially consistent) at the moment each error is built:
//!
//! ```rust
//! use tserror::{include_stack_trace, set_include_stack_trace};
//!
//! assert!(!include_stack_trace());
//! set_include_stack_trace(true);
//! assert!(include_stack_trace());
//! ```
//!
//! ## Feature Flags
//!
//! | Flag        | Effect |
//! |-------------|--------|
//! | `backtrace` | (default) Call-stack capture backend via the `backtrace` crate. Without it, `stack-trace` entries are empty sequences and the runtime toggle is otherwise inert. |

mod codes;
mod info;
mod error;
mod capture;
#[macro_use]
mod macros;
mod convert;

// ── Public API ────────────────────────────────────────────────────

pub use codes::ErrorCode;
pub use info::{
    ErrorInfo, KEY_CLASS_AND_METHOD, KEY_DESCRIPTION, KEY_STACK_TRACE, KEY_UNDERLYING_ERROR,
};
pub use error::{TsError, ERROR_DOMAIN};
pub use capture::{include_stack_trace, set_include_stack_trace};
pub use convert::ResultExt;

/// Convenience Result alias.
pub type TsResult<T> = Result<T, TsError>;
