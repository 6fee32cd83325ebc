use crate::models::subscription_info::{InfoValue, SubscriptionInfo};

/// Parses a `subscription-userinfo` header value
///
/// The value is a `;` separated list of `key=value` pairs such as
/// `upload=0; download=123456; total=1073741824; expire=1735689600`.
/// Keys are lowercased, values that parse as base-10 integers are stored
/// as integers and everything else as the trimmed text. Segments without
/// `=` are dropped. This never fails; an empty header gives an empty map.
///
/// Integers are held as `i64`. A digit string outside its range (over nine
/// exabytes of traffic) is kept as text rather than truncated.
pub fn parse_info(header_value: &str) -> SubscriptionInfo {
    let mut info = SubscriptionInfo::new();
    for segment in header_value.split(';') {
        let Some((key, value)) = segment.trim().split_once('=') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        let value = match value.parse::<i64>() {
            Ok(v) => InfoValue::Int(v),
            Err(_) => InfoValue::Text(value.to_string()),
        };
        info.insert(key, value);
    }
    info
}
