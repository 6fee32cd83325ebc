//! Subscription URL rewriting

use linked_hash_map::LinkedHashMap;
use url::Url;

use crate::constants::{PROTOCOL_FILTER_PARAM, PROTOCOL_FILTER_PATH, PROTOCOL_FILTER_VALUE};

/// Prepares a subscription URL before it is fetched
///
/// Providers serving under [`PROTOCOL_FILTER_PATH`] accept an `exclude`
/// query parameter listing protocols to leave out of the document. For
/// those URLs the parameter is set (or overwritten) while every other
/// query parameter is kept, including repeated and blank ones. Any other
/// URL, or one that does not parse, is returned unchanged.
///
/// # Arguments
/// * `input` - The subscription URL as entered by the user
///
/// # Returns
/// * The URL to request
///
/// # Examples
/// ```
/// use clash_cleaner::utils::url::prepare_url;
///
/// let url = prepare_url("https://host/clashmeta/sub?token=abc");
/// assert!(url.contains("token=abc"));
/// assert!(url.contains("exclude="));
/// assert_eq!(prepare_url("https://host/sub?token=abc"), "https://host/sub?token=abc");
/// ```
pub fn prepare_url(input: &str) -> String {
    let mut url = match Url::parse(input) {
        Ok(url) => url,
        Err(_) => return input.to_string(),
    };
    if !url.path().contains(PROTOCOL_FILTER_PATH) {
        return input.to_string();
    }

    // Repeated keys are grouped at the position of their first occurrence
    let mut params: LinkedHashMap<String, Vec<String>> = LinkedHashMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_insert_with(Vec::new)
            .push(value.into_owned());
    }
    match params.get_mut(PROTOCOL_FILTER_PARAM) {
        Some(values) => *values = vec![PROTOCOL_FILTER_VALUE.to_string()],
        None => {
            params.insert(
                PROTOCOL_FILTER_PARAM.to_string(),
                vec![PROTOCOL_FILTER_VALUE.to_string()],
            );
        }
    }

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (key, values) in &params {
            for value in values {
                query.append_pair(key, value);
            }
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .into_owned()
            .collect()
    }

    #[test]
    fn test_injects_exclude() {
        let out = prepare_url("https://host/clashmeta/sub?token=abc");
        assert_eq!(
            pairs(&out),
            vec![
                ("token".to_string(), "abc".to_string()),
                ("exclude".to_string(), PROTOCOL_FILTER_VALUE.to_string()),
            ]
        );
        assert!(out.starts_with("https://host/clashmeta/sub?"));
    }

    #[test]
    fn test_overwrites_existing_exclude_in_place() {
        let out = prepare_url("https://host/clashmeta/sub?exclude=vless&token=abc");
        assert_eq!(
            pairs(&out),
            vec![
                ("exclude".to_string(), PROTOCOL_FILTER_VALUE.to_string()),
                ("token".to_string(), "abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_keeps_lists_and_blank_values() {
        let out = prepare_url("https://host/x/clashmeta/y?a=1&b=&a=2");
        assert_eq!(
            pairs(&out),
            vec![
                ("a".to_string(), "1".to_string()),
                ("a".to_string(), "2".to_string()),
                ("b".to_string(), String::new()),
                ("exclude".to_string(), PROTOCOL_FILTER_VALUE.to_string()),
            ]
        );
    }

    #[test]
    fn test_other_urls_unchanged() {
        assert_eq!(
            prepare_url("https://host/sub?token=abc"),
            "https://host/sub?token=abc"
        );
        // only the path is inspected
        assert_eq!(
            prepare_url("https://host/sub?p=/clashmeta/"),
            "https://host/sub?p=/clashmeta/"
        );
        assert_eq!(prepare_url("not a url"), "not a url");
    }
}
