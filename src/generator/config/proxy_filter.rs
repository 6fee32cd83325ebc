use std::collections::BTreeMap;

use log::debug;
use serde_yaml::Value;

use crate::models::proxy::ProxyRecord;
use crate::utils::string::clean_display_name;

/// Field dropped from kept proxies; downstream clients do not understand it
const DROPPED_FIELD: &str = "transport";

/// Count of removed proxies per lowercased type
pub type RejectionSummary = BTreeMap<String, usize>;

/// An input element that was not a mapping and therefore ignored
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    /// Position in the input sequence
    pub index: usize,
    pub reason: String,
}

impl SkippedEntry {
    pub(crate) fn not_a_mapping(index: usize, value: &Value) -> Self {
        let kind = match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Tagged(_) => "tagged value",
        };
        Self {
            index,
            reason: format!("expected a mapping, found a {}", kind),
        }
    }
}

/// Result of [`filter_proxies`]
#[derive(Debug, Clone, Default)]
pub struct FilteredProxies {
    pub kept: Vec<ProxyRecord>,
    pub rejected: RejectionSummary,
    pub skipped: Vec<SkippedEntry>,
}

impl FilteredProxies {
    /// Names of the kept proxies, used to validate group members
    pub fn names(&self) -> Vec<String> {
        self.kept.iter().filter_map(ProxyRecord::name).collect()
    }

    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

/// Splits proxy entries into supported ones and per-type rejection counts
///
/// Kept proxies get their name cleaned and the `transport` field removed;
/// their relative order is preserved. Elements that are not mappings are
/// reported in `skipped` and counted nowhere else.
pub fn filter_proxies(entries: &[Value]) -> FilteredProxies {
    let mut result = FilteredProxies::default();

    for (index, entry) in entries.iter().enumerate() {
        let Value::Mapping(fields) = entry else {
            debug!("Skipping proxy entry #{}: not a mapping", index);
            result.skipped.push(SkippedEntry::not_a_mapping(index, entry));
            continue;
        };

        let mut proxy = ProxyRecord::new(fields.clone());
        if !proxy.is_supported() {
            *result.rejected.entry(proxy.proxy_type()).or_insert(0) += 1;
            continue;
        }
        if let Some(name) = proxy.name() {
            proxy.set_name(clean_display_name(&name));
        }
        proxy.remove_field(DROPPED_FIELD);
        result.kept.push(proxy);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(yaml: &str) -> Vec<Value> {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_filter_example() {
        let input = entries(
            r#"
- { type: vmess, name: "🚀 HK" }
- { type: ssr, name: x }
"#,
        );
        let result = filter_proxies(&input);
        assert_eq!(result.kept.len(), 1);
        assert_eq!(result.kept[0].name().as_deref(), Some("HK"));
        assert_eq!(result.kept[0].proxy_type(), "vmess");
        assert_eq!(result.rejected, BTreeMap::from([("ssr".to_string(), 1)]));
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_type_case_and_transport() {
        let input = entries(
            r#"
- { name: a, type: VLESS, transport: grpc, server: s }
- { name: b, type: Hysteria }
- { name: c, type: hysteria }
- { name: d }
"#,
        );
        let result = filter_proxies(&input);
        assert_eq!(result.kept.len(), 1);
        let kept = result.kept[0].fields();
        assert!(!kept.contains_key("transport"));
        assert_eq!(kept.get("type"), Some(&Value::from("VLESS")));
        assert_eq!(result.rejected.get("hysteria"), Some(&2));
        assert_eq!(result.rejected.get(""), Some(&1));
    }

    #[test]
    fn test_null_type_counts_as_missing() {
        let input = entries(
            r#"
- { name: a, type: ~ }
- { name: b }
"#,
        );
        let result = filter_proxies(&input);
        assert!(result.kept.is_empty());
        assert_eq!(result.rejected, BTreeMap::from([(String::new(), 2)]));
    }

    #[test]
    fn test_skipped_entries() {
        let input = entries(
            r#"
- just a string
- { type: trojan, name: t }
- 42
- ~
"#,
        );
        let result = filter_proxies(&input);
        assert_eq!(result.kept.len(), 1);
        assert_eq!(result.rejected_total(), 0);
        let indices: Vec<usize> = result.skipped.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 2, 3]);
        assert_eq!(result.skipped[0].reason, "expected a mapping, found a string");
    }

    #[test]
    fn test_unnamed_proxy_kept() {
        let result = filter_proxies(&entries("- { type: ss, server: s }"));
        assert_eq!(result.kept.len(), 1);
        assert!(result.names().is_empty());
    }
}
