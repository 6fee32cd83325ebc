use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::constants::SUPPORTED_PROXY_TYPES;
use crate::utils::yaml::{get_string, remove_key};

/// One outbound proxy entry of a Clash document
///
/// Only `name` and `type` are interpreted; every other field is carried
/// through untouched and in its original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProxyRecord {
    fields: Mapping,
}

impl ProxyRecord {
    pub fn new(fields: Mapping) -> Self {
        Self { fields }
    }

    /// Display name, if the record carries one
    pub fn name(&self) -> Option<String> {
        get_string(&self.fields, "name")
    }

    /// Replaces the name, keeping the field in its position
    pub fn set_name(&mut self, name: String) {
        self.fields
            .insert(Value::from("name"), Value::String(name));
    }

    /// Transport kind, lowercased; empty if the field is absent
    pub fn proxy_type(&self) -> String {
        get_string(&self.fields, "type")
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Whether the transport is one the cleaned document keeps
    pub fn is_supported(&self) -> bool {
        SUPPORTED_PROXY_TYPES.contains(&self.proxy_type().as_str())
    }

    /// Drops a field, keeping the order of the rest
    pub fn remove_field(&mut self, key: &str) {
        if self.fields.contains_key(key) {
            self.fields = remove_key(std::mem::take(&mut self.fields), key);
        }
    }

    pub fn fields(&self) -> &Mapping {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(self.fields)
    }
}

impl From<Mapping> for ProxyRecord {
    fn from(fields: Mapping) -> Self {
        Self::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(yaml: &str) -> ProxyRecord {
        ProxyRecord::new(serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn test_accessors() {
        let mut proxy = record("name: a\ntype: VMess\nserver: example.com\nport: 443");
        assert_eq!(proxy.name().as_deref(), Some("a"));
        assert_eq!(proxy.proxy_type(), "vmess");
        assert!(proxy.is_supported());

        proxy.set_name("b".to_string());
        let keys: Vec<&str> = proxy.fields().keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["name", "type", "server", "port"]);
        assert_eq!(proxy.name().as_deref(), Some("b"));
    }

    #[test]
    fn test_missing_type() {
        let proxy = record("name: a");
        assert_eq!(proxy.proxy_type(), "");
        assert!(!proxy.is_supported());
        assert!(record("type: ssr").name().is_none());
    }
}
