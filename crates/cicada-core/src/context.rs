//! Event Context
//!
//! A read-only, flat mapping from dotted field paths (`action`, `hook.sha`)
//! to scalar values, built by the caller from a webhook event. One context is
//! created per incoming event and discarded after compilation; the compiler
//! only ever looks paths up, it never mutates the context.

use crate::types::Value;
use std::collections::HashMap;

/// Flat event field mapping evaluated against trigger and binding expressions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventContext {
    fields: HashMap<String, Value>,
}

impl EventContext {
    /// Start building a context
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Look up a dotted path. Absent paths return `None`; the evaluator
    /// treats that as the distinguished undefined value, never an error.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let value = self.fields.get(path);
        if value.is_none() {
            tracing::debug!(path = %path, "event context path undefined");
        }
        value
    }

    /// Returns true if the path is present
    pub fn contains(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    /// Number of fields in the context
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the context has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Typed builder for [`EventContext`]
#[derive(Debug, Default)]
pub struct ContextBuilder {
    fields: HashMap<String, Value>,
}

impl ContextBuilder {
    /// Add a string field
    pub fn string(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(path.into(), Value::String(value.into()));
        self
    }

    /// Add a numeric field
    pub fn number(mut self, path: impl Into<String>, value: f64) -> Self {
        self.fields.insert(path.into(), Value::Number(value));
        self
    }

    /// Add a boolean field
    pub fn boolean(mut self, path: impl Into<String>, value: bool) -> Self {
        self.fields.insert(path.into(), Value::Bool(value));
        self
    }

    /// Add an already-typed value
    pub fn value(mut self, path: impl Into<String>, value: Value) -> Self {
        self.fields.insert(path.into(), value);
        self
    }

    /// Finish building
    pub fn build(self) -> EventContext {
        EventContext {
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let ctx = EventContext::builder()
            .string("action", "opened")
            .string("hook.sha", "ec26c3e")
            .number("hook.number", 2.0)
            .boolean("hook.draft", false)
            .build();

        assert_eq!(ctx.lookup("action"), Some(&Value::String("opened".to_string())));
        assert_eq!(ctx.lookup("hook.sha"), Some(&Value::String("ec26c3e".to_string())));
        assert_eq!(ctx.lookup("hook.number"), Some(&Value::Number(2.0)));
        assert_eq!(ctx.lookup("hook.draft"), Some(&Value::Bool(false)));
        assert_eq!(ctx.len(), 4);
    }

    #[test]
    fn test_lookup_missing_path() {
        let ctx = EventContext::builder().string("action", "opened").build();
        assert_eq!(ctx.lookup("hook.sha"), None);
        assert!(!ctx.contains("hook.sha"));
    }

    #[test]
    fn test_empty_context() {
        let ctx = EventContext::builder().build();
        assert!(ctx.is_empty());
        assert_eq!(ctx.lookup("anything"), None);
    }
}
