use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::constants::{DIRECT, REJECT};
use crate::utils::yaml::{get_string, value_to_string};

/// Routing strategy of a proxy group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyGroupType {
    Select,
    URLTest,
    Fallback,
    LoadBalance,
}

impl ProxyGroupType {
    /// Get string representation of the proxy group type
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyGroupType::Select => "select",
            ProxyGroupType::URLTest => "url-test",
            ProxyGroupType::LoadBalance => "load-balance",
            ProxyGroupType::Fallback => "fallback",
        }
    }

    /// Parses a lowercased type string; other strategies are unsupported
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "select" => Some(ProxyGroupType::Select),
            "url-test" => Some(ProxyGroupType::URLTest),
            "fallback" => Some(ProxyGroupType::Fallback),
            "load-balance" => Some(ProxyGroupType::LoadBalance),
            _ => None,
        }
    }

    /// Automatic strategies may only route through real proxies or groups
    pub fn is_automatic(&self) -> bool {
        !matches!(self, ProxyGroupType::Select)
    }
}

/// Whether a member reference is one of the built-in policies
pub fn is_builtin_policy(member: &str) -> bool {
    member == DIRECT || member == REJECT
}

/// One entry of `proxy-groups`
///
/// `name`, `type` and `proxies` are interpreted, everything else is
/// passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProxyGroupRecord {
    fields: Mapping,
}

impl ProxyGroupRecord {
    pub fn new(fields: Mapping) -> Self {
        Self { fields }
    }

    pub fn name(&self) -> Option<String> {
        get_string(&self.fields, "name")
    }

    pub fn set_name(&mut self, name: String) {
        self.fields
            .insert(Value::from("name"), Value::String(name));
    }

    /// The `type` field exactly as written in the source
    pub fn raw_type(&self) -> String {
        get_string(&self.fields, "type").unwrap_or_default()
    }

    pub fn group_type(&self) -> Option<ProxyGroupType> {
        ProxyGroupType::from_str(&self.raw_type().to_lowercase())
    }

    /// Member references; an absent or null `proxies` field reads as empty
    pub fn members(&self) -> Vec<String> {
        match self.fields.get("proxies") {
            Some(Value::Sequence(seq)) => seq.iter().map(value_to_string).collect(),
            _ => Vec::new(),
        }
    }

    pub fn set_members(&mut self, members: Vec<String>) {
        let seq = members.into_iter().map(Value::String).collect();
        self.fields
            .insert(Value::from("proxies"), Value::Sequence(seq));
    }

    pub fn fields(&self) -> &Mapping {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(self.fields)
    }
}

impl From<Mapping> for ProxyGroupRecord {
    fn from(fields: Mapping) -> Self {
        Self::new(fields)
    }
}
