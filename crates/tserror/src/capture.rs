//! Process-wide stack-capture switch and the frame-capture backend.
//!
//! The switch defaults to off and is read once per construction. Loads and
//! stores are sequentially consistent: a `set_include_stack_trace(true)`
//! on one thread is visible to constructions already running on other
//! worker threads, with no per-call lock.

use std::sync::atomic::{AtomicBool, Ordering};

static INCLUDE_STACK_TRACE: AtomicBool = AtomicBool::new(false);

/// Turn call-stack capture on or off for all subsequent constructions.
/// Existing errors are never touched.
pub fn set_include_stack_trace(enabled: bool) {
    INCLUDE_STACK_TRACE.store(enabled, Ordering::SeqCst);
}

/// Whether constructions happening now will capture the call stack.
#[inline]
pub fn include_stack_trace() -> bool {
    INCLUDE_STACK_TRACE.load(Ordering::SeqCst)
}

cfg_if::cfg_if! {
    if #[cfg(feature = "backtrace")] {
        /// Capture the current call stack as frame descriptors, innermost
        /// first. Leading frames belonging to this crate and the unwinder
        /// are skipped so the first descriptor is the construction site's
        /// caller.
        pub(crate) fn capture_stack() -> Vec<String> {
            let mut frames = Vec::new();
            let mut skipping = true;
            for frame in backtrace::Backtrace::new().frames() {
                let descriptor = match frame.symbols().first() {
                    Some(symbol) => describe(symbol),
                    None => format!("{:p}", frame.ip()),
                };
                if skipping && is_internal(&descriptor) {
                    continue;
                }
                skipping = false;
                frames.push(descriptor);
            }
            frames
        }

        fn describe(symbol: &backtrace::BacktraceSymbol) -> String {
            let name = symbol
                .name()
                .map(|n| n.to_string())
                .unwrap_or_else(|| String::from("<unknown>"));
            match (symbol.filename(), symbol.lineno()) {
                (Some(file), Some(line)) => format!("{name} ({}:{line})", file.display()),
                _ => name,
            }
        }

        fn is_internal(descriptor: &str) -> bool {
            descriptor.contains("backtrace::")
                || descriptor.contains("tserror::capture")
                || descriptor.contains("tserror::error::TsError")
        }
    } else {
        /// No-op backend: platforms or builds without unwinder support
        /// still honor the toggle, they just have no frames to report.
        pub(crate) fn capture_stack() -> Vec<String> {
            Vec::new()
        }
    }
}

/// Tests toggling the process-wide switch must hold this guard so they do
/// not interleave with tests that pin it off.
#[cfg(test)]
pub(crate) fn flag_guard() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trip() {
        let _guard = flag_guard();
        set_include_stack_trace(false);
        assert!(!include_stack_trace());
        set_include_stack_trace(true);
        assert!(include_stack_trace());
        set_include_stack_trace(false);
    }

    #[cfg(feature = "backtrace")]
    #[test]
    fn captures_caller_frames() {
        let frames = capture_stack();
        assert!(!frames.is_empty());
        assert!(!frames[0].contains("tserror::capture::capture_stack"));
    }

    #[cfg(not(feature = "backtrace"))]
    #[test]
    fn no_op_backend_is_empty() {
        assert!(capture_stack().is_empty());
    }
}
