//! Insertion-ordered request parameter map.
//!
//! Parameters accumulate as `String -> serde_json::Value` pairs so a single
//! map serves every body mode: query strings, urlencoded forms, and JSON
//! object bodies. Insertion order is preserved because it is visible on the
//! wire (query strings, form bodies) and in diagnostic output.

use serde_json::Value;

/// Ordered parameter map with replace-in-place semantics.
///
/// Re-inserting an existing key replaces its value but keeps the original
/// insertion position. `Value::Null` is normalized to an empty string on
/// insert and is never stored.
///
/// # Examples
///
/// ```
/// use relay_http::request::ParamMap;
/// use serde_json::Value;
///
/// let mut params = ParamMap::new();
/// params.insert("user".into(), "ada".into());
/// params.insert("page".into(), 2.into());
/// params.insert("note".into(), Value::Null);
///
/// assert_eq!(params.get("note"), Some(&Value::String(String::new())));
/// let keys: Vec<_> = params.iter().map(|(k, _)| k.as_str()).collect();
/// assert_eq!(keys, ["user", "page", "note"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: Vec<(String, Value)>,
}

impl ParamMap {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        ParamMap { entries: Vec::new() }
    }

    /// Insert a parameter, normalizing `Value::Null` to `""`.
    ///
    /// The null normalization mirrors the behavior this crate was built
    /// against; it can mask a caller bug where a missing value was intended
    /// to omit the parameter entirely, so callers that care should filter
    /// before inserting.
    pub fn insert(&mut self, key: String, value: Value) {
        let value = match value {
            Value::Null => Value::String(String::new()),
            other => other,
        };
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *slot = value;
            return;
        }
        self.entries.push((key, value));
    }

    /// Bulk-merge pairs; a no-op on empty input.
    pub fn extend(&mut self, pairs: impl IntoIterator<Item = (String, Value)>) {
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// True when `key` has been inserted.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no parameters have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.entries.iter()
    }

    /// Pairs rendered as display strings, for query strings and form bodies.
    ///
    /// String values render without surrounding quotes; everything else uses
    /// its JSON rendering.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), display_value(v)))
            .collect()
    }

    /// `key=value` pairs joined with `", "`, for diagnostic dumps.
    pub fn to_key_value(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, display_value(v)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut params = ParamMap::new();
        for key in ["z", "a", "m", "b"] {
            params.insert(key.into(), key.into());
        }
        let keys: Vec<_> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["z", "a", "m", "b"]);
    }

    #[test]
    fn null_becomes_empty_string() {
        let mut params = ParamMap::new();
        params.insert("key".into(), Value::Null);
        assert_eq!(params.get("key"), Some(&Value::String(String::new())));
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut params = ParamMap::new();
        params.insert("a".into(), 1.into());
        params.insert("b".into(), 2.into());
        params.insert("a".into(), 3.into());
        let pairs = params.to_pairs();
        assert_eq!(pairs, vec![("a".into(), "3".into()), ("b".into(), "2".into())]);
    }

    #[test]
    fn extend_is_noop_on_empty() {
        let mut params = ParamMap::new();
        params.extend(Vec::new());
        assert!(params.is_empty());
    }

    #[test]
    fn display_pairs_render_strings_bare() {
        let mut params = ParamMap::new();
        params.insert("name".into(), "ada".into());
        params.insert("admin".into(), true.into());
        assert_eq!(params.to_key_value(), "name=ada, admin=true");
    }
}
