use std::error::Error;
use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

use crate::capture;
use crate::codes::ErrorCode;
use crate::info::{
    snapshot_cause, ErrorInfo, KEY_CLASS_AND_METHOD, KEY_DESCRIPTION, KEY_STACK_TRACE,
    KEY_UNDERLYING_ERROR,
};

/// The fixed domain carried by every error this crate produces.
pub const ERROR_DOMAIN: &str = "com.tidesync.framework";

/// A TideSync error — a catalog code plus an ordered diagnostic payload.
///
/// Values are immutable once constructed and exclusively owned by the
/// caller; every constructor builds a fresh payload. `Display` dumps the
/// whole payload, see [`Quick Start`](crate#quick-start) for the shape.
///
/// # Construction
///
/// Four constructors cover the input shapes sync operations raise errors
/// with; all of them funnel through [`compose`](TsError::compose), which
/// owns the merge rules:
///
/// - auto-derived entries (`description`, `underlying-error`,
///   `class-and-method`) are added only when the corresponding input was
///   supplied and the caller's info does not already define the key;
/// - on exact key collision the caller-supplied value always wins;
/// - if the process-wide capture switch is on at the moment of the call,
///   the current call stack lands under `stack-trace`.
#[derive(Clone, PartialEq)]
pub struct TsError {
    code: ErrorCode,
    info: ErrorInfo,
}

// ── Constructors ──────────────────────────────────────────────────

impl TsError {
    /// Build from a code and caller-supplied info. `description` is seeded
    /// from the catalog if `info` does not define it.
    pub fn with_info(code: ErrorCode, info: ErrorInfo) -> Self {
        Self::compose(code, None, Some(info), None)
    }

    /// Build from a code and a caller tag; sets `class-and-method`.
    pub fn with_context(code: ErrorCode, context: &str) -> Self {
        Self::compose(code, None, None, Some(context))
    }

    /// Build from a code, an underlying cause, and a caller tag. The cause
    /// is captured as a rendered snapshot under `underlying-error`, never
    /// retained live.
    pub fn from_cause(code: ErrorCode, cause: &(dyn Error + 'static), context: &str) -> Self {
        Self::compose(code, Some(cause), None, Some(context))
    }

    /// General form: any combination of cause, info, and context. Absent
    /// optional inputs are valid inputs — construction never fails.
    pub fn compose(
        code: ErrorCode,
        cause: Option<&(dyn Error + 'static)>,
        info: Option<ErrorInfo>,
        context: Option<&str>,
    ) -> Self {
        let mut info = info.unwrap_or_default();
        info.insert_absent(KEY_DESCRIPTION, code.description());
        if let Some(cause) = cause {
            info.insert_absent(KEY_UNDERLYING_ERROR, snapshot_cause(cause));
        }
        if let Some(context) = context {
            info.insert_absent(KEY_CLASS_AND_METHOD, context);
        }
        if capture::include_stack_trace() {
            let frames: Vec<Value> =
                capture::capture_stack().into_iter().map(Value::String).collect();
            info.insert_absent(KEY_STACK_TRACE, Value::Array(frames));
        }
        TsError { code, info }
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl TsError {
    /// Always [`ERROR_DOMAIN`].
    #[inline]
    pub fn domain(&self) -> &'static str {
        ERROR_DOMAIN
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    #[inline]
    pub fn info(&self) -> &ErrorInfo {
        &self.info
    }

    /// The `description` entry, falling back to the catalog text when the
    /// caller overrode the entry with a non-string value.
    pub fn description(&self) -> &str {
        self.info.description().unwrap_or(self.code.description())
    }

    /// One-line rendering: domain, code, quoted description. This is the
    /// first line of `Display` and the text other errors embed when this
    /// error is their cause.
    pub fn summary(&self) -> String {
        format!(
            "Error Domain={} Code={} {:?}",
            ERROR_DOMAIN,
            self.code.value(),
            self.description()
        )
    }
}

// ── std::error::Error ─────────────────────────────────────────────

// source() stays None: the cause lives on as the `underlying-error`
// snapshot, not as a live chained reference.
impl Error for TsError {}

// ── Display ───────────────────────────────────────────────────────

impl fmt::Display for TsError {
    /// Full diagnostic dump: the summary line, then every info entry in
    /// insertion order as `key = value`, with sequence values rendered as
    /// an indented numbered list.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())?;
        for (key, value) in self.info.iter() {
            write!(f, "\n  {key} = ")?;
            fmt_value(f, value)?;
        }
        Ok(())
    }
}

fn fmt_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(text) => write!(f, "{text}"),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                match item {
                    Value::String(text) => write!(f, "\n      {index:<3} {text}")?,
                    other => write!(f, "\n      {index:<3} {other}")?,
                }
            }
            Ok(())
        }
        other => write!(f, "{other}"),
    }
}

// ── Debug ─────────────────────────────────────────────────────────

impl fmt::Debug for TsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TsError")
            .field("domain", &ERROR_DOMAIN)
            .field("code", &self.code)
            .field("info", &self.info)
            .finish()
    }
}

// ── Serialize ─────────────────────────────────────────────────────

impl Serialize for TsError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TsError", 3)?;
        state.serialize_field("domain", ERROR_DOMAIN)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("info", &self.info)?;
        state.end()
    }
}
