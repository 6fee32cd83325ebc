//! Group name translation
//!
//! Subscriptions commonly label their groups in Chinese. The table maps
//! known labels to localized ones and is consulted in insertion order, so
//! the first matching entry always wins.

use serde::{Deserialize, Serialize};

use crate::constants::group_names::{GROUP_NAME_TABLE, SELECTOR_LABEL};
use crate::utils::string::{collapse_whitespace, strip_decoration, strip_script};

/// One `from -> to` entry of a [`NameTable`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMapping {
    pub from: String,
    pub to: String,
}

/// Ordered label table plus the label of the manual selector group
#[derive(Debug, Clone, PartialEq)]
pub struct NameTable {
    entries: Vec<(String, String)>,
    selector_label: String,
}

impl Default for NameTable {
    fn default() -> Self {
        Self {
            entries: GROUP_NAME_TABLE
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            selector_label: SELECTOR_LABEL.to_string(),
        }
    }
}

impl NameTable {
    /// Builds a table from mappings, keeping their order
    pub fn new(mappings: &[NameMapping], selector_label: &str) -> Self {
        Self {
            entries: mappings
                .iter()
                .map(|m| (m.from.clone(), m.to.clone()))
                .collect(),
            selector_label: selector_label.to_string(),
        }
    }

    pub fn with_selector_label(mut self, label: &str) -> Self {
        self.selector_label = label.to_string();
        self
    }

    /// The preferred catch-all target label
    pub fn selector_label(&self) -> &str {
        &self.selector_label
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Translates a group label
    ///
    /// 1. An exact match of the trimmed label returns the mapped value.
    /// 2. Otherwise the first entry (in table order) contained in the label
    ///    has every occurrence replaced; the result is stripped of
    ///    decorations and remaining ideographs and returned, or the mapped
    ///    value alone if nothing is left.
    /// 3. Otherwise the label is stripped the same way; if nothing is left
    ///    the trimmed label is returned unchanged.
    pub fn translate(&self, label: &str) -> String {
        let trimmed = label.trim();
        if let Some((_, to)) = self.entries.iter().find(|(from, _)| from == trimmed) {
            return to.clone();
        }

        for (from, to) in &self.entries {
            if from.is_empty() || !trimmed.contains(from.as_str()) {
                continue;
            }
            let result = normalize(&trimmed.replace(from.as_str(), to));
            return if result.is_empty() { to.clone() } else { result };
        }

        let result = normalize(trimmed);
        if result.is_empty() {
            trimmed.to_string()
        } else {
            result
        }
    }
}

fn normalize(s: &str) -> String {
    collapse_whitespace(&strip_script(&strip_decoration(s)))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let table = NameTable::default();
        assert_eq!(table.translate("节点选择"), "Выбор");
        assert_eq!(table.translate("  自动选择 "), "Авто");
        // exact match beats the earlier substring entry
        assert_eq!(table.translate("国际流媒体"), "Стриминг");
    }

    #[test]
    fn test_substring_match() {
        let table = NameTable::default();
        assert_eq!(table.translate("🚀 节点选择"), "Выбор");
        assert_eq!(table.translate("🇭🇰 香港节点 01"), "Гонконг 01");
        assert_eq!(table.translate("Netflix 解锁 服务"), "Netflix Разблокировка");
    }

    #[test]
    fn test_substring_uses_table_order() {
        let table = NameTable::new(
            &[
                NameMapping { from: "AB".into(), to: "first".into() },
                NameMapping { from: "B".into(), to: "second".into() },
            ],
            "first",
        );
        assert_eq!(table.translate("xABx"), "xfirstx");
        assert_eq!(table.translate("xBx"), "xsecondx");
    }

    #[test]
    fn test_substring_empty_result_falls_back_to_mapping() {
        let table = NameTable::new(
            &[NameMapping { from: "中".into(), to: "🌐".into() }],
            "x",
        );
        assert_eq!(table.translate("中国"), "🌐");
    }

    #[test]
    fn test_passthrough() {
        let table = NameTable::default();
        assert_eq!(table.translate("Proxy"), "Proxy");
        assert_eq!(table.translate("🎯 全部  Nodes"), "Nodes");
        assert_eq!(table.translate("其它"), "其它");
        assert_eq!(table.translate(""), "");
    }

    #[test]
    fn test_deterministic() {
        let table = NameTable::default();
        for label in ["节点选择", "🇯🇵 日本节点", "misc"] {
            assert_eq!(table.translate(label), table.translate(label));
        }
    }
}
