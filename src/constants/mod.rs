//! Fixed tables the transformation engine relies on.

pub mod group_names;
pub mod rules;

/// Proxy transports that survive filtering, compared lowercased
pub const SUPPORTED_PROXY_TYPES: [&str; 7] = [
    "vless",
    "vmess",
    "ss",
    "trojan",
    "hysteria2",
    "tuic",
    "wireguard",
];

/// Top-level settings copied verbatim from the source document
pub const PASSTHROUGH_KEYS: [&str; 19] = [
    "port",
    "socks-port",
    "mixed-port",
    "redir-port",
    "allow-lan",
    "bind-address",
    "mode",
    "log-level",
    "external-controller",
    "dns",
    "tun",
    "ipv6",
    "unified-delay",
    "tcp-concurrent",
    "global-client-fingerprint",
    "geodata-mode",
    "geox-url",
    "geo-auto-update",
    "geo-update-interval",
];

/// Built-in policy that sends traffic out without a proxy
pub const DIRECT: &str = "DIRECT";
/// Built-in policy that drops traffic
pub const REJECT: &str = "REJECT";

/// Path fragment of providers that honour the protocol `exclude` parameter
pub const PROTOCOL_FILTER_PATH: &str = "/clashmeta/";
pub const PROTOCOL_FILTER_PARAM: &str = "exclude";
pub const PROTOCOL_FILTER_VALUE: &str = "naive|shadowtls|ssh|mieru|xhttp|shadowsocks+shadowtls";

pub const DEFAULT_PORT: u16 = 8080;
/// How many ports after the preferred one are probed for a free listener
pub const PORT_SEARCH_RANGE: u16 = 20;

pub const OUTPUT_FILE_NAME: &str = "clean.yaml";
pub const CONFIG_FILE_NAME: &str = "app_config.json";
pub const SUB_CACHE_FILE_NAME: &str = "sub_cache.json";

/// Response header carrying quota/expiry accounting
pub const SUB_INFO_HEADER: &str = "subscription-userinfo";
/// Headers some providers use instead of [`SUB_INFO_HEADER`], in lookup order
pub const SUB_INFO_HEADER_ALIASES: [&str; 2] = ["x-subscription-userinfo", "profile-userinfo"];

pub const BANNER_LABEL: &str = "Cleaned Clash Meta config";
