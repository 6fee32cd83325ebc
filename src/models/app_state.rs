use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::{error, info};

use crate::models::subscription_info::SubscriptionInfo;
use crate::settings::{Settings, SubCache};

/// Shared state of the running application
#[derive(Debug)]
pub struct AppState {
    settings: RwLock<Settings>,
    settings_path: PathBuf,

    /// Metadata of the last successful conversion
    last: RwLock<SubCache>,

    converting: Arc<AtomicBool>,
}

/// Marks a conversion as running until dropped
#[derive(Debug)]
pub struct ConversionGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for ConversionGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            settings: RwLock::new(settings),
            settings_path,
            last: RwLock::new(SubCache::default()),
            converting: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings.read().unwrap().clone()
    }

    /// Stores a new subscription URL and persists it
    ///
    /// Only the URL is written back; other values in memory may be
    /// command line overrides and stay out of the settings file.
    pub fn set_url(&self, url: &str) {
        let mut settings = self.settings.write().unwrap();
        if settings.url == url {
            return;
        }
        settings.url = url.to_string();

        let mut stored = Settings::load(&self.settings_path);
        stored.url = url.to_string();
        if let Err(e) = stored.save(&self.settings_path) {
            error!(
                "Failed to save settings to {}: {}",
                self.settings_path.display(),
                e
            );
        }
    }

    /// Claims the single conversion slot, `None` if a conversion is running
    pub fn try_begin_conversion(&self) -> Option<ConversionGuard> {
        self.converting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ConversionGuard {
                flag: Arc::clone(&self.converting),
            })
    }

    pub fn is_converting(&self) -> bool {
        self.converting.load(Ordering::Acquire)
    }

    /// Raw metadata header to echo to clients, empty if none is known
    pub fn sub_header(&self) -> String {
        self.last.read().unwrap().header.clone()
    }

    pub fn sub_info(&self) -> SubscriptionInfo {
        self.last.read().unwrap().info.clone()
    }

    /// Records the metadata of a finished conversion and caches it on disk
    pub fn record_subscription(&self, header: String, info: SubscriptionInfo) {
        let cache = SubCache { header, info };
        let path = self.settings().cache_file();
        if let Err(e) = cache.save(&path) {
            error!("Failed to write subscription cache {}: {}", path.display(), e);
        }
        *self.last.write().unwrap() = cache;
    }

    /// Restores the metadata of a previous run, if cached
    pub fn load_cached_subscription(&self) -> bool {
        let path = self.settings().cache_file();
        match SubCache::load(&path) {
            Some(cache) => {
                if !cache.info.is_empty() {
                    info!("Subscription metadata loaded from cache");
                }
                *self.last.write().unwrap() = cache;
                true
            }
            None => false,
        }
    }
}
