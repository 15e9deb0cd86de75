//! Placeholder substitution
//!
//! `{name}` is replaced by the variable's value, or by `name` itself when the
//! variable is unknown. `{{` and `}}` produce literal braces. Brace groups
//! whose content is not an identifier (`{host:web-1}`, `{*}`) pass through
//! untouched.

use serde_yaml::Value;
use std::collections::BTreeMap;

/// Named template variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: BTreeMap<String, String>,
}

impl Variables {
    /// Create an empty variable set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Set every scalar entry of a YAML mapping; nested values are ignored
    pub fn extend_from_yaml(&mut self, value: &Value) {
        let Some(mapping) = value.as_mapping() else {
            return;
        };
        for (key, value) in mapping {
            if let (Some(key), Some(value)) = (key.as_str(), scalar_to_string(value)) {
                self.set(key, value);
            }
        }
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Substitute every placeholder in `text`
    pub fn substitute(&self, text: &str) -> String {
        substitute_with(text, |name| self.get(name).map(str::to_string))
    }
}

/// Render a YAML scalar the way it reads in the source file
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Substitute placeholders using an arbitrary lookup
pub fn substitute_with<F>(text: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
            continue;
        }

        if tail.starts_with('{') {
            if let Some(end) = tail[1..].find('}') {
                let name = &tail[1..=end];
                if is_identifier(name) {
                    match lookup(name) {
                        Some(value) => out.push_str(&value),
                        None => out.push_str(name),
                    }
                    rest = &tail[end + 2..];
                    continue;
                }
            }
        }

        // Lone brace: copy it and keep scanning after it.
        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
