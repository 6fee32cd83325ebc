use chrono::{DateTime, Local};
use serde_yaml::Mapping;

use crate::constants::BANNER_LABEL;

/// Serializes a cleaned document behind a three-line comment banner
///
/// The banner records the label, the subscription URL as entered and the
/// processing time (`YYYY-MM-DD HH:MM`). `serde_yaml` keeps keys in
/// insertion order, writes block style and leaves unicode unescaped.
pub fn render_document(
    config: &Mapping,
    source_url: &str,
    processed_at: DateTime<Local>,
) -> Result<String, serde_yaml::Error> {
    let body = serde_yaml::to_string(config)?;
    Ok(format!(
        "# {}\n# Source: {}\n# Processed: {}\n\n{}",
        BANNER_LABEL,
        source_url,
        processed_at.format("%Y-%m-%d %H:%M"),
        body
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_banner_and_body() {
        let config: Mapping = serde_yaml::from_str(
            "mixed-port: 7890\nproxies:\n- name: Гонконг\n  type: vmess\nrules:\n- MATCH,Выбор\n",
        )
        .unwrap();
        let at = Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap();
        let text = render_document(&config, "https://host/sub", at).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("# Cleaned Clash Meta config"));
        assert_eq!(lines.next(), Some("# Source: https://host/sub"));
        assert_eq!(lines.next(), Some("# Processed: 2024-03-05 09:07"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("mixed-port: 7890"));

        assert!(text.contains("Гонконг"));
        assert!(text.contains("- MATCH,Выбор"));
        assert!(!text.contains('{'));

        let back: Mapping = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
