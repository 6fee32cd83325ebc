//! String utility functions for display-name processing

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DECORATION_REGEX: Regex = Regex::new(concat!(
        r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}",
        r"\x{1F1E0}-\x{1F1FF}\x{2700}-\x{27BF}\x{1F900}-\x{1F9FF}",
        r"\x{2600}-\x{26FF}\x{2B00}-\x{2BFF}\x{1FA00}-\x{1FA6F}",
        r"\x{1FA70}-\x{1FAFF}\x{FE00}-\x{FE0F}\x{1F004}\x{1F0CF}]+"
    ))
    .unwrap();
    static ref CJK_REGEX: Regex = Regex::new(r"[\x{4E00}-\x{9FFF}\x{3400}-\x{4DBF}]+").unwrap();
    static ref MULTI_SPACE_REGEX: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Removes pictographic symbols (emoji, flags, dingbats, variation selectors)
///
/// # Arguments
///
/// * `s` - The input string
///
/// # Returns
///
/// The string without decorations, trimmed on both ends
pub fn strip_decoration(s: &str) -> String {
    DECORATION_REGEX.replace_all(s, "").trim().to_string()
}

/// Removes CJK ideographs and trims the result
///
/// Whitespace left between the removed runs is kept as is.
pub fn strip_script(s: &str) -> String {
    CJK_REGEX.replace_all(s, "").trim().to_string()
}

/// Replaces every run of two or more whitespace characters with one space
pub fn collapse_whitespace(s: &str) -> String {
    MULTI_SPACE_REGEX.replace_all(s, " ").to_string()
}

/// Cleans a proxy display name: strips decorations, collapses whitespace
/// and trims
///
/// # Examples
///
/// ```
/// use clash_cleaner::utils::string::clean_display_name;
///
/// assert_eq!(clean_display_name("🚀 HK"), "HK");
/// assert_eq!(clean_display_name("🇯🇵  Tokyo   01"), "Tokyo 01");
/// ```
pub fn clean_display_name(s: &str) -> String {
    collapse_whitespace(&strip_decoration(s)).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_decoration() {
        assert_eq!(strip_decoration("🚀 HK"), "HK");
        assert_eq!(strip_decoration("🇺🇸 US ⚡"), "US");
        assert_eq!(strip_decoration("☁️ cloud"), "cloud");
        assert_eq!(strip_decoration("plain"), "plain");
        assert_eq!(strip_decoration(""), "");
    }

    #[test]
    fn test_strip_decoration_keeps_inner_spacing() {
        assert_eq!(strip_decoration("A 🔥  B"), "A   B");
    }

    #[test]
    fn test_strip_script() {
        assert_eq!(strip_script("香港 HK"), "HK");
        assert_eq!(strip_script("A 中文 B"), "A  B");
        assert_eq!(strip_script("节点选择"), "");
        assert_eq!(strip_script("Выбор"), "Выбор");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  b\t\tc"), "a b c");
        assert_eq!(collapse_whitespace("a b"), "a b");
        assert_eq!(collapse_whitespace("a\tb"), "a\tb");
    }

    #[test]
    fn test_clean_display_name() {
        assert_eq!(clean_display_name("🚀 HK"), "HK");
        assert_eq!(clean_display_name("  Node  🔥  01  "), "Node 01");
        assert_eq!(clean_display_name("🇭🇰"), "");
        assert_eq!(clean_display_name(""), "");
    }
}
