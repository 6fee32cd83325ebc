pub mod assemble;
pub mod group;
pub mod group_name;
pub mod proxy_filter;
