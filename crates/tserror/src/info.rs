//! The diagnostic payload attached to every TideSync error.
//!
//! `ErrorInfo` is an insertion-ordered `String -> Value` map. Order is part
//! of the contract: rendering walks entries in the order they were added,
//! and replacing a value keeps its original position. Four keys are
//! reserved; their exact names are stable because downstream tooling
//! matches on them.

use std::error::Error;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::TsError;

/// Reserved key: short human-readable summary, seeded from the code
/// catalog unless the caller supplies its own.
pub const KEY_DESCRIPTION: &str = "description";

/// Reserved key: rendered snapshot of the underlying cause, present only
/// when a cause was supplied at construction.
pub const KEY_UNDERLYING_ERROR: &str = "underlying-error";

/// Reserved key: the caller tag identifying which operation raised the
/// error, present only when a context string was supplied.
pub const KEY_CLASS_AND_METHOD: &str = "class-and-method";

/// Reserved key: captured call-stack frames, innermost first, present only
/// when capture was enabled at construction time.
pub const KEY_STACK_TRACE: &str = "stack-trace";

/// Insertion-ordered diagnostic entries.
#[derive(Clone, Default, PartialEq)]
pub struct ErrorInfo {
    entries: Vec<(String, Value)>,
}

impl ErrorInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, chaining. Same replacement semantics as [`insert`].
    ///
    /// [`insert`]: ErrorInfo::insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add an entry. If the key already exists its value is replaced and
    /// the entry keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Add an entry only if the key is absent. This is the merge primitive
    /// behind the precedence rule: auto-derived entries are seeded with it,
    /// so a caller-supplied value always wins on exact key collision.
    /// Returns whether the entry was added.
    pub fn insert_absent(&mut self, key: &str, value: impl Into<Value>) -> bool {
        if self.contains_key(key) {
            return false;
        }
        self.entries.push((key.to_owned(), value.into()));
        true
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The entry's value as a string slice, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Reserved-key accessors ────────────────────────────────────

    pub fn description(&self) -> Option<&str> {
        self.get_str(KEY_DESCRIPTION)
    }

    pub fn underlying_error(&self) -> Option<&str> {
        self.get_str(KEY_UNDERLYING_ERROR)
    }

    pub fn class_and_method(&self) -> Option<&str> {
        self.get_str(KEY_CLASS_AND_METHOD)
    }

    /// Captured frames, innermost first.
    pub fn stack_trace(&self) -> Option<&[Value]> {
        match self.get(KEY_STACK_TRACE) {
            Some(Value::Array(frames)) => Some(frames),
            _ => None,
        }
    }
}

impl fmt::Debug for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
    }
}

impl Serialize for ErrorInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Render a cause into the `underlying-error` snapshot value.
///
/// The snapshot is text, never the live object: a cause from an unrelated
/// error domain stays inert inside the info map, and chained errors cannot
/// form reference cycles. A `TsError` cause collapses to its one-line
/// summary plus its own (already flattened) cause text; anything else is
/// its `Display` output followed by the `source()` chain.
pub(crate) fn snapshot_cause(cause: &(dyn Error + 'static)) -> Value {
    if let Some(ts) = cause.downcast_ref::<TsError>() {
        let mut text = ts.summary();
        if let Some(underlying) = ts.info().underlying_error() {
            text.push_str(" (caused by: ");
            text.push_str(underlying);
            text.push(')');
        }
        return Value::String(text);
    }

    let mut text = cause.to_string();
    let mut source = cause.source();
    while let Some(inner) = source {
        text.push_str(" (caused by: ");
        text.push_str(&inner.to_string());
        text.push(')');
        source = inner.source();
    }
    Value::String(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_preserved() {
        let mut info = ErrorInfo::new();
        info.insert("zeta", "z");
        info.insert("alpha", "a");
        info.insert("mid", 3);
        let keys: Vec<&str> = info.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut info = ErrorInfo::new();
        info.insert("first", 1);
        info.insert("second", 2);
        info.insert("first", 10);
        let entries: Vec<(&str, &Value)> = info.iter().collect();
        assert_eq!(entries[0].0, "first");
        assert_eq!(entries[0].1, &Value::from(10));
        assert_eq!(info.len(), 2);
    }

    #[test]
    fn insert_absent_never_overwrites() {
        let mut info = ErrorInfo::new();
        assert!(info.insert_absent(KEY_DESCRIPTION, "seeded"));
        assert!(!info.insert_absent(KEY_DESCRIPTION, "clobbered"));
        assert_eq!(info.description(), Some("seeded"));
    }

    #[test]
    fn with_chaining() {
        let info = ErrorInfo::new().with("path", "/store").with("attempts", 3);
        assert_eq!(info.get_str("path"), Some("/store"));
        assert_eq!(info.get("attempts"), Some(&Value::from(3)));
    }

    #[test]
    fn reserved_accessors() {
        let mut info = ErrorInfo::new();
        info.insert(KEY_CLASS_AND_METHOD, "tidesync::vacuum::find_date");
        info.insert(KEY_STACK_TRACE, Value::Array(vec![Value::from("frame 0")]));
        assert_eq!(info.class_and_method(), Some("tidesync::vacuum::find_date"));
        assert_eq!(info.stack_trace().map(<[Value]>::len), Some(1));
        assert_eq!(info.underlying_error(), None);
    }

    #[test]
    fn get_str_rejects_non_strings() {
        let mut info = ErrorInfo::new();
        info.insert(KEY_DESCRIPTION, 42);
        assert_eq!(info.description(), None);
        assert!(info.contains_key(KEY_DESCRIPTION));
    }

    #[test]
    fn snapshot_walks_source_chain() {
        #[derive(Debug)]
        struct Outer(std::io::Error);
        impl fmt::Display for Outer {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "the file could not be opened")
            }
        }
        impl Error for Outer {
            fn source(&self) -> Option<&(dyn Error + 'static)> {
                Some(&self.0)
            }
        }

        let cause = Outer(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "operation not permitted",
        ));
        let snapshot = snapshot_cause(&cause);
        let text = snapshot.as_str().unwrap();
        assert!(text.starts_with("the file could not be opened"));
        assert!(text.contains("caused by: operation not permitted"));
    }

    #[test]
    fn serializes_in_insertion_order() {
        let info = ErrorInfo::new().with("b", 1).with("a", 2);
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"b":1,"a":2}"#);
    }
}
