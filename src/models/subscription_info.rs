use chrono::{DateTime, Local};
use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};

/// A metadata value: an integer when the header value parses as one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    Int(i64),
    Text(String),
}

impl InfoValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            InfoValue::Int(v) => Some(*v),
            InfoValue::Text(_) => None,
        }
    }
}

/// How close the subscription is to running out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaStatus {
    Ok,
    Warning,
    Exhausted,
}

/// Quota and expiry accounting sent by the provider
///
/// Keys are lowercase and kept in header order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionInfo {
    entries: LinkedHashMap<String, InfoValue>,
}

impl SubscriptionInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: InfoValue) {
        self.entries.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &InfoValue)> {
        self.entries.iter()
    }

    fn int(&self, key: &str) -> i64 {
        self.get(key).and_then(InfoValue::as_int).unwrap_or(0)
    }

    pub fn upload(&self) -> i64 {
        self.int("upload")
    }

    pub fn download(&self) -> i64 {
        self.int("download")
    }

    pub fn total(&self) -> i64 {
        self.int("total")
    }

    /// Traffic consumed so far
    pub fn used(&self) -> i64 {
        self.upload().saturating_add(self.download())
    }

    /// Share of the quota used, capped at 100; `None` without a total
    pub fn usage_percent(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some((self.used() as f64 / total as f64 * 100.0).min(100.0))
    }

    /// Expiry time, if the provider sent a non-zero unix timestamp
    pub fn expire_at(&self) -> Option<DateTime<Local>> {
        match self.int("expire") {
            0 => None,
            ts => DateTime::from_timestamp(ts, 0).map(|dt| dt.with_timezone(&Local)),
        }
    }

    /// Whole days until expiry, rounded down (negative once expired)
    pub fn days_left(&self, now: DateTime<Local>) -> Option<i64> {
        self.expire_at()
            .map(|expire| (expire - now).num_seconds().div_euclid(86_400))
    }

    /// Expiry overrides traffic when both are known
    pub fn status(&self, now: DateTime<Local>) -> QuotaStatus {
        let mut status = QuotaStatus::Ok;
        if let Some(pct) = self.usage_percent() {
            status = if pct >= 100.0 {
                QuotaStatus::Exhausted
            } else if pct >= 80.0 {
                QuotaStatus::Warning
            } else {
                QuotaStatus::Ok
            };
        }
        if let Some(days) = self.days_left(now) {
            status = if days <= 0 {
                QuotaStatus::Exhausted
            } else if days <= 7 {
                QuotaStatus::Warning
            } else {
                QuotaStatus::Ok
            };
        }
        status
    }

    /// Human-readable traffic and expiry lines
    pub fn summary(&self, now: DateTime<Local>) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(pct) = self.usage_percent() {
            lines.push(format!(
                "Traffic: {} / {} ({:.1}%)",
                format_bytes(self.used()),
                format_bytes(self.total()),
                pct
            ));
        }
        if let (Some(expire), Some(days)) = (self.expire_at(), self.days_left(now)) {
            let left = match days {
                d if d < 0 => format!("expired {} days ago", -d),
                0 => "expires today".to_string(),
                d => format!("{} days left", d),
            };
            lines.push(format!("Subscription: until {} ({})", expire.format("%Y-%m-%d"), left));
        }
        lines
    }
}

/// Formats a byte count with a binary unit and two decimals
pub fn format_bytes(bytes: i64) -> String {
    const KB: f64 = 1024.0;
    let value = bytes as f64;
    if value >= KB * KB * KB {
        format!("{:.2} GB", value / (KB * KB * KB))
    } else if value >= KB * KB {
        format!("{:.2} MB", value / (KB * KB))
    } else if value >= KB {
        format!("{:.2} KB", value / KB)
    } else {
        format!("{} B", bytes)
    }
}
