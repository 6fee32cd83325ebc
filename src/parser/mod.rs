pub mod document;
pub mod subscription_info;

pub use document::{parse_document, DocumentError};
pub use subscription_info::parse_info;
