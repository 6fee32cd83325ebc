//! Group rebuilding
//!
//! Rebuilds every supported proxy group against the proxies that survived
//! filtering, translating group names on the way.

use std::collections::{HashMap, HashSet};

use log::debug;
use serde_yaml::Value;

use crate::generator::config::group_name::NameTable;
use crate::generator::config::proxy_filter::SkippedEntry;
use crate::models::proxy_group::{is_builtin_policy, ProxyGroupRecord, ProxyGroupType};

/// Result of [`process_groups`]
#[derive(Debug, Clone, Default)]
pub struct ProcessedGroups {
    pub groups: Vec<ProxyGroupRecord>,
    /// Names of groups dropped for an unsupported type or no real members
    pub dropped: Vec<String>,
    pub skipped: Vec<SkippedEntry>,
}

impl ProcessedGroups {
    pub fn names(&self) -> Vec<String> {
        self.groups.iter().filter_map(ProxyGroupRecord::name).collect()
    }
}

/// Rebuilds proxy groups
///
/// # Arguments
///
/// * `entries` - The `proxy-groups` sequence of the source document
/// * `valid_proxies` - Names of the proxies kept by the filter
/// * `table` - Translation table for group names
///
/// # Returns
///
/// Groups in input order. A member is kept if it names a kept proxy, is an
/// original group name (rewritten to its translation), is an already
/// translated group name or is `DIRECT`/`REJECT`. Automatic strategies lose
/// `DIRECT`/`REJECT`, and a group without any other member is dropped.
pub fn process_groups(
    entries: &[Value],
    valid_proxies: &HashSet<String>,
    table: &NameTable,
) -> ProcessedGroups {
    let mut result = ProcessedGroups::default();

    // Every mapping entry takes part in renaming, even ones dropped below
    let rename_map: HashMap<String, String> = entries
        .iter()
        .filter_map(Value::as_mapping)
        .map(|fields| {
            let name = ProxyGroupRecord::new(fields.clone()).name().unwrap_or_default();
            let translated = table.translate(&name);
            (name, translated)
        })
        .collect();
    let translated_names: HashSet<&String> = rename_map.values().collect();

    for (index, entry) in entries.iter().enumerate() {
        let Value::Mapping(fields) = entry else {
            debug!("Skipping group entry #{}: not a mapping", index);
            result.skipped.push(SkippedEntry::not_a_mapping(index, entry));
            continue;
        };
        let mut group = ProxyGroupRecord::new(fields.clone());
        let old_name = group.name().unwrap_or_default();

        let Some(group_type) = group.group_type() else {
            debug!("Dropping group {:?}: unsupported type {:?}", old_name, group.raw_type());
            result.dropped.push(old_name);
            continue;
        };

        let mut members: Vec<String> = group
            .members()
            .into_iter()
            .filter_map(|member| {
                resolve_member(member, valid_proxies, &rename_map, &translated_names)
            })
            .collect();

        if group_type.is_automatic() {
            members.retain(|m| !is_builtin_policy(m));
        }
        if members.iter().all(|m| is_builtin_policy(m)) {
            debug!("Dropping group {:?}: no usable members", old_name);
            result.dropped.push(old_name);
            continue;
        }

        let new_name = rename_map
            .get(&old_name)
            .cloned()
            .unwrap_or(old_name);
        group.set_name(new_name);
        group.set_members(members);
        result.groups.push(group);
    }

    result
}

fn resolve_member(
    member: String,
    valid_proxies: &HashSet<String>,
    rename_map: &HashMap<String, String>,
    translated_names: &HashSet<&String>,
) -> Option<String> {
    if valid_proxies.contains(&member) {
        return Some(member);
    }
    if let Some(renamed) = rename_map.get(&member) {
        return Some(renamed.clone());
    }
    if translated_names.contains(&member) || is_builtin_policy(&member) {
        return Some(member);
    }
    None
}

/// Picks the group the catch-all rule routes to
///
/// A group named like the table's selector label wins, then the first
/// `select` group, then the first group. Without any group the selector
/// label is returned even though no such group exists.
pub fn select_main_group(groups: &[ProxyGroupRecord], table: &NameTable) -> String {
    let label = table.selector_label();
    if groups.iter().any(|g| g.name().as_deref() == Some(label)) {
        return label.to_string();
    }
    groups
        .iter()
        .find(|g| g.raw_type() == ProxyGroupType::Select.as_str())
        .or_else(|| groups.first())
        .and_then(ProxyGroupRecord::name)
        .unwrap_or_else(|| label.to_string())
}
