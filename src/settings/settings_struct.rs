use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::constants::group_names::SELECTOR_LABEL;
use crate::constants::{DEFAULT_PORT, OUTPUT_FILE_NAME, SUB_CACHE_FILE_NAME};
use crate::generator::config::group_name::{NameMapping, NameTable};

/// Persistent application settings (`app_config.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Subscription URL, stored as entered
    #[serde(default)]
    pub url: String,
    /// Preferred port of the local endpoint
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory receiving the cleaned document and the metadata cache
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Replacement for the built-in group name table, in lookup order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_names: Option<Vec<NameMapping>>,
    /// Label of the preferred catch-all group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector_label: Option<String>,
}

// Default value functions for serde
pub fn default_port() -> u16 {
    DEFAULT_PORT
}

pub fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            url: String::new(),
            port: default_port(),
            output_dir: default_output_dir(),
            group_names: None,
            selector_label: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults
    ///
    /// A missing file is normal on first start; an unreadable or malformed
    /// one is logged and ignored.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}, using defaults", path.display());
                return Settings::default();
            }
            Err(e) => {
                warn!("Failed to read settings {}: {}", path.display(), e);
                return Settings::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring malformed settings file {}: {}", path.display(), e);
                Settings::default()
            }
        }
    }

    /// Writes the settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
    }

    /// The group name table, either configured or built in
    pub fn name_table(&self) -> NameTable {
        let label = self.selector_label.as_deref().unwrap_or(SELECTOR_LABEL);
        match &self.group_names {
            Some(mappings) => NameTable::new(mappings, label),
            None => NameTable::default().with_selector_label(label),
        }
    }

    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE_NAME)
    }

    pub fn cache_file(&self) -> PathBuf {
        self.output_dir.join(SUB_CACHE_FILE_NAME)
    }
}
