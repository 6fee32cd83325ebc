use serde_yaml::{Mapping, Value};

/// Renders a YAML value the way it would be displayed as a name or type
///
/// Strings are returned as is, numbers and booleans in their YAML form,
/// null as an empty string. Collections have no natural display form and
/// fall back to their inline YAML rendering.
///
/// An explicit null therefore reads the same as a missing key: a proxy with
/// `type: ~` is tallied under the empty type, not under `"none"`.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Tagged(tagged) => value_to_string(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Looks up `key` in a mapping and renders the value with [`value_to_string`]
pub fn get_string(map: &Mapping, key: &str) -> Option<String> {
    map.get(key).map(value_to_string)
}

/// Removes `key` from a mapping while keeping the order of the other entries
pub fn remove_key(map: Mapping, key: &str) -> Mapping {
    map.into_iter()
        .filter(|(k, _)| k.as_str() != Some(key))
        .collect()
}
