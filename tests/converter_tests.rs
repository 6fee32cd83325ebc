use std::fs;

use chrono::{Local, TimeZone};
use clash_cleaner::generator::NameTable;
use clash_cleaner::interfaces::converter::process_subscription;
use clash_cleaner::interfaces::{convert, convert_text, ConvertError, ConvertOptions};
use clash_cleaner::parser::parse_document;
use serde_yaml::Value;
use tempfile::tempdir;

const SUBSCRIPTION: &str = r#"
mixed-port: 7890
proxies:
  - {name: "🇭🇰 香港 01", type: ss, server: hk.example.com, port: 8388, cipher: aes-128-gcm, password: pw}
  - {name: old, type: ssr, server: old.example.com, port: 8388}
proxy-groups:
  - name: 节点选择
    type: select
    proxies: ["🇭🇰 香港 01", DIRECT]
"#;

const HEADER: &str = "upload=100; download=200; total=1000000000; expire=1999999999";

#[cfg(test)]
mod converter_tests {
    use super::*;

    #[test]
    fn test_banner_and_unicode() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let processed = process_subscription(
            SUBSCRIPTION,
            HEADER,
            "https://host/sub",
            &NameTable::default(),
            now,
        )
        .unwrap();

        let mut lines = processed.yaml.lines();
        assert_eq!(lines.next(), Some("# Cleaned Clash Meta config"));
        assert_eq!(lines.next(), Some("# Source: https://host/sub"));
        assert_eq!(lines.next(), Some("# Processed: 2024-05-01 09:30"));
        assert!(processed.yaml.contains("Выбор"));
        assert!(processed.yaml.contains("MATCH,Выбор"));
        assert!(!processed.yaml.contains("\\u"));

        let reparsed = parse_document(&processed.yaml).unwrap();
        assert!(reparsed.get("proxies").unwrap().is_sequence());
        assert_eq!(processed.outcome.info.total(), 1000000000);
        assert_eq!(processed.outcome.rejected.get("ssr"), Some(&1));
    }

    #[actix_web::test]
    async fn test_convert_text_writes_output() {
        let dir = tempdir().unwrap();
        let options = ConvertOptions {
            output_file: dir.path().join("clean.yaml"),
            table: NameTable::default(),
        };
        let outcome = convert_text(SUBSCRIPTION, HEADER, "https://host/sub", &options)
            .await
            .unwrap();
        assert_eq!(outcome.proxy_count, 1);
        // the only group references the proxy by its decorated name
        assert_eq!(outcome.group_count, 0);
        assert_eq!(outcome.main_group, "Выбор");
        assert_eq!(outcome.header, HEADER);

        let written = fs::read_to_string(&options.output_file).unwrap();
        let doc = parse_document(&written).unwrap();
        assert_eq!(doc.get("mixed-port"), Some(&Value::from(7890)));
        let proxies = doc.get("proxies").unwrap().as_sequence().unwrap();
        assert_eq!(proxies[0].get("name").unwrap(), "香港 01");
        assert_eq!(
            doc.get("proxy-groups"),
            Some(&Value::Sequence(Vec::new()))
        );
        let rules = doc.get("rules").unwrap().as_sequence().unwrap();
        assert_eq!(rules.last().unwrap(), "MATCH,Выбор");
    }

    #[actix_web::test]
    async fn test_invalid_document_writes_nothing() {
        let dir = tempdir().unwrap();
        let options = ConvertOptions {
            output_file: dir.path().join("clean.yaml"),
            table: NameTable::default(),
        };
        let result = convert_text("just text", "", "https://host/sub", &options).await;
        assert!(matches!(result, Err(ConvertError::Document(_))));
        assert!(!options.output_file.exists());
    }

    #[actix_web::test]
    async fn test_convert_rejects_bad_urls() {
        let options = ConvertOptions {
            output_file: "unused.yaml".into(),
            table: NameTable::default(),
        };
        assert!(matches!(
            convert("", &options).await,
            Err(ConvertError::EmptyUrl)
        ));
        assert!(matches!(
            convert("http://host/sub", &options).await,
            Err(ConvertError::InsecureUrl)
        ));
    }
}
