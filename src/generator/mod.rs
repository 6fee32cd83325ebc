pub mod config;
pub mod yaml;

// Re-export the transformation engine
pub use config::assemble::{assemble, AssembledConfig};
pub use config::group::{process_groups, select_main_group, ProcessedGroups};
pub use config::group_name::{NameMapping, NameTable};
pub use config::proxy_filter::{filter_proxies, FilteredProxies, RejectionSummary, SkippedEntry};
pub use yaml::render_document;
