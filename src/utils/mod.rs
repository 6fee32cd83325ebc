pub mod http;
pub mod string;
pub mod system;
pub mod url;
pub mod yaml;

// Re-export common utilities
pub use string::clean_display_name;
pub use system::find_free_port;
pub use self::url::prepare_url;
