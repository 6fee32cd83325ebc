use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::models::subscription_info::SubscriptionInfo;

/// Metadata of the last successful conversion (`sub_cache.json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubCache {
    /// Raw metadata header as received
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub info: SubscriptionInfo,
}

impl SubCache {
    /// Reads the cache; a missing or broken file yields `None`
    pub fn load(path: &Path) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No subscription cache at {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(cache) => Some(cache),
            Err(e) => {
                warn!("Ignoring malformed subscription cache {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, serde_json::to_string(self)?)
    }
}
