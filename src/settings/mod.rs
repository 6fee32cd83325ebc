//! Settings and cache persistence
//!
//! Both files live next to the application and are plain JSON.

pub mod cache;
pub mod settings_struct;

pub use cache::SubCache;
pub use settings_struct::Settings;
