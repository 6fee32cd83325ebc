use std::collections::HashSet;

use serde_yaml::{Mapping, Value};

use crate::constants::rules::{match_rule, LOCAL_RULES};
use crate::constants::PASSTHROUGH_KEYS;
use crate::generator::config::group::{process_groups, select_main_group};
use crate::generator::config::group_name::NameTable;
use crate::generator::config::proxy_filter::{filter_proxies, RejectionSummary, SkippedEntry};

/// The cleaned document together with what was removed on the way
#[derive(Debug, Clone)]
pub struct AssembledConfig {
    pub config: Mapping,
    pub rejected: RejectionSummary,
    pub proxy_count: usize,
    pub group_count: usize,
    /// Target of the catch-all rule
    pub main_group: String,
    pub skipped_proxies: Vec<SkippedEntry>,
    pub skipped_groups: Vec<SkippedEntry>,
    /// Groups dropped for an unsupported type or no usable members
    pub dropped_groups: Vec<String>,
}

fn sequence<'a>(source: &'a Mapping, key: &str) -> &'a [Value] {
    match source.get(key) {
        Some(Value::Sequence(seq)) => seq.as_slice(),
        _ => &[],
    }
}

/// Builds the cleaned document
///
/// Copies the passthrough settings, filters `proxies`, rebuilds
/// `proxy-groups` and replaces `rules` with the local bypass rules followed
/// by one `MATCH` rule. The catch-all target is not checked against the
/// rebuilt groups: without any group it names the selector label anyway.
pub fn assemble(source: &Mapping, table: &NameTable) -> AssembledConfig {
    let mut config = Mapping::new();
    for key in PASSTHROUGH_KEYS {
        if let Some(value) = source.get(key) {
            config.insert(Value::from(key), value.clone());
        }
    }

    let proxies = filter_proxies(sequence(source, "proxies"));
    let valid_names: HashSet<String> = proxies.names().into_iter().collect();
    let groups = process_groups(sequence(source, "proxy-groups"), &valid_names, table);
    let main_group = select_main_group(&groups.groups, table);

    let proxy_count = proxies.kept.len();
    let group_count = groups.groups.len();

    config.insert(
        Value::from("proxies"),
        Value::Sequence(proxies.kept.into_iter().map(|p| p.into_value()).collect()),
    );
    config.insert(
        Value::from("proxy-groups"),
        Value::Sequence(groups.groups.into_iter().map(|g| g.into_value()).collect()),
    );
    let rules = LOCAL_RULES
        .iter()
        .map(|r| Value::from(*r))
        .chain(std::iter::once(Value::String(match_rule(&main_group))))
        .collect();
    config.insert(Value::from("rules"), Value::Sequence(rules));

    AssembledConfig {
        config,
        rejected: proxies.rejected,
        proxy_count,
        group_count,
        main_group,
        skipped_proxies: proxies.skipped,
        skipped_groups: groups.skipped,
        dropped_groups: groups.dropped,
    }
}
