pub mod constants;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;
#[cfg(feature = "web-api")]
pub mod web_handlers;

// Re-export the record types for easier access
pub use models::{AppState, ProxyGroupRecord, ProxyRecord, SubscriptionInfo};

// Re-export the pipeline entry points
pub use generator::{assemble, AssembledConfig, NameTable};
pub use interfaces::{convert, convert_text, ConvertError, ConvertOptions, ConvertOutcome};
pub use settings::Settings;
