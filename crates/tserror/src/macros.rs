/// Construct a [`TsError`](crate::TsError) with the caller tag filled in.
///
/// The `class-and-method` entry is derived from `module_path!()` and
/// `file!()`:`line!()`, the conventional caller tag for sync operations,
/// so call sites never spell it by hand.
///
/// # Forms
///
/// ```ignore
/// // Bare code:
/// ts_err!(ErrorCode::FileManagerError)
///
/// // With an underlying cause:
/// ts_err!(ErrorCode::FileManagerError, source = io_err)
///
/// // With extra diagnostic entries:
/// ts_err!(ErrorCode::StoreFetchFailed, { "path": "/store/doc", "attempts": 3 })
///
/// // With cause + entries:
/// ts_err!(ErrorCode::StoreFetchFailed, source = io_err, { "path": "/store/doc" })
/// ```
#[macro_export]
macro_rules! ts_err {
    // ── Bare code ─────────────────────────────────────────────
    ($code:expr) => {
        $crate::TsError::with_context($code, $crate::__context!())
    };

    // ── With underlying cause ─────────────────────────────────
    ($code:expr, source = $cause:expr) => {
        $crate::TsError::from_cause(
            $code,
            &$cause as &(dyn ::std::error::Error + 'static),
            $crate::__context!(),
        )
    };

    // ── With extra entries ────────────────────────────────────
    ($code:expr, { $($key:literal : $value:expr),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut info = $crate::ErrorInfo::new();
        $( info.insert($key, $value); )*
        $crate::TsError::compose($code, None, Some(info), Some($crate::__context!()))
    }};

    // ── With cause + extra entries ────────────────────────────
    ($code:expr, source = $cause:expr, { $($key:literal : $value:expr),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut info = $crate::ErrorInfo::new();
        $( info.insert($key, $value); )*
        $crate::TsError::compose(
            $code,
            Some(&$cause as &(dyn ::std::error::Error + 'static)),
            Some(info),
            Some($crate::__context!()),
        )
    }};
}

/// Internal: the caller tag for `ts_err!`.
#[doc(hidden)]
#[macro_export]
macro_rules! __context {
    () => {
        concat!(module_path!(), " (", file!(), ":", line!(), ")")
    };
}

/// Early-return with a [`ts_err!`](crate::ts_err) if a condition is false.
///
/// ```ignore
/// ts_ensure!(state.is_registered(), ErrorCode::UnexpectedStoreStructure);
/// ```
#[macro_export]
macro_rules! ts_ensure {
    ($cond:expr, $code:expr) => {
        if !$cond {
            return Err($crate::ts_err!($code));
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::capture::{flag_guard, set_include_stack_trace};
    use crate::{ErrorCode, TsResult};
    use std::io;

    #[test]
    fn bare_form_tags_the_call_site() {
        let _guard = flag_guard();
        set_include_stack_trace(false);
        let err = ts_err!(ErrorCode::FileManagerError);
        let tag = err.info().class_and_method().unwrap();
        assert!(tag.starts_with("tserror::macros::tests"));
        assert!(tag.contains("macros.rs"));
    }

    #[test]
    fn source_form_snapshots_the_cause() {
        let _guard = flag_guard();
        set_include_stack_trace(false);
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = ts_err!(ErrorCode::StoreFetchFailed, source = io_err);
        assert!(err.info().underlying_error().unwrap().contains("gone"));
    }

    #[test]
    fn info_form_merges_entries() {
        let _guard = flag_guard();
        set_include_stack_trace(false);
        let err = ts_err!(ErrorCode::StoreFetchFailed, {
            "path": "/store/doc",
            "attempts": 3,
        });
        assert_eq!(err.info().get_str("path"), Some("/store/doc"));
        assert_eq!(err.description(), "Failed to fetch from the document store");
        assert!(err.info().class_and_method().is_some());
    }

    #[test]
    fn full_form() {
        let _guard = flag_guard();
        set_include_stack_trace(false);
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "locked");
        let err = ts_err!(ErrorCode::StoreSaveFailed, source = io_err, {
            "path": "/store/doc",
        });
        assert!(err.info().underlying_error().unwrap().contains("locked"));
        assert_eq!(err.info().get_str("path"), Some("/store/doc"));
    }

    #[test]
    fn ensure_passes_and_fails() {
        let _guard = flag_guard();
        set_include_stack_trace(false);
        fn check(registered: bool) -> TsResult<()> {
            ts_ensure!(registered, ErrorCode::UnexpectedStoreStructure);
            Ok(())
        }
        assert!(check(true).is_ok());
        let err = check(false).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnexpectedStoreStructure);
    }
}
