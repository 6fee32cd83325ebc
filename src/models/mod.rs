//! Core data models for the application
//!
//! Proxy and group records keep their subscription fields verbatim; the
//! transformation logic operating on them lives in [`crate::generator`].

pub mod app_state;
pub mod proxy;
pub mod proxy_group;
pub mod subscription_info;

pub use app_state::{AppState, ConversionGuard};
pub use proxy::ProxyRecord;
pub use proxy_group::{is_builtin_policy, ProxyGroupRecord, ProxyGroupType};
pub use subscription_info::{format_bytes, InfoValue, QuotaStatus, SubscriptionInfo};
