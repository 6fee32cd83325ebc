//! Conversion pipeline
//!
//! Ties the transformation engine to its collaborators: URL preparation,
//! download, metadata parsing, YAML decoding, rendering and persistence.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use thiserror::Error;

use crate::generator::config::assemble::assemble;
use crate::generator::config::group_name::NameTable;
use crate::generator::config::proxy_filter::RejectionSummary;
use crate::generator::yaml::render_document;
use crate::models::app_state::{AppState, ConversionGuard};
use crate::models::subscription_info::SubscriptionInfo;
use crate::parser::{parse_document, parse_info, DocumentError};
use crate::utils::http::{fetch_subscription, FetchError};
use crate::utils::url::prepare_url;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("No subscription URL configured")]
    EmptyUrl,

    #[error("Subscription URL must start with https://")]
    InsecureUrl,

    #[error("A conversion is already running")]
    AlreadyRunning,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Failed to render YAML: {0}")]
    Render(#[from] serde_yaml::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Where and how a conversion writes its result
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub output_file: PathBuf,
    pub table: NameTable,
}

/// Statistics and metadata of a finished conversion
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    pub proxy_count: usize,
    pub group_count: usize,
    pub main_group: String,
    pub rejected: RejectionSummary,
    pub info: SubscriptionInfo,
    /// Raw metadata header, passed on to clients of the local endpoint
    pub header: String,
}

/// A rendered document and its outcome, before anything is written
#[derive(Debug, Clone)]
pub struct ProcessedSubscription {
    pub yaml: String,
    pub outcome: ConvertOutcome,
}

/// Checks the user-supplied subscription URL
pub fn validate_url(url: &str) -> Result<(), ConvertError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ConvertError::EmptyUrl);
    }
    if !url.starts_with("https://") {
        return Err(ConvertError::InsecureUrl);
    }
    Ok(())
}

/// Formats removed types as `type(count)` pairs in type order
pub fn describe_rejected(rejected: &RejectionSummary) -> String {
    rejected
        .iter()
        .map(|(t, n)| format!("{}({})", t, n))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runs every step after the download
///
/// # Arguments
/// * `text` - The subscription document
/// * `header` - Raw metadata header, possibly empty
/// * `source_url` - The URL as entered, recorded in the banner
/// * `table` - Group name table
/// * `now` - Processing time recorded in the banner
pub fn process_subscription(
    text: &str,
    header: &str,
    source_url: &str,
    table: &NameTable,
    now: DateTime<Local>,
) -> Result<ProcessedSubscription, ConvertError> {
    let info = parse_info(header);

    debug!("Parsing YAML");
    let document = parse_document(text)?;

    debug!("Filtering protocols and groups");
    let assembled = assemble(&document, table);
    if !assembled.rejected.is_empty() {
        warn!("Removed protocols: {}", describe_rejected(&assembled.rejected));
    }
    if !assembled.skipped_proxies.is_empty() || !assembled.skipped_groups.is_empty() {
        debug!(
            "Skipped malformed entries: {} proxies, {} groups",
            assembled.skipped_proxies.len(),
            assembled.skipped_groups.len()
        );
    }
    if !assembled.dropped_groups.is_empty() {
        debug!("Dropped groups: {:?}", assembled.dropped_groups);
    }

    let yaml = render_document(&assembled.config, source_url, now)?;
    Ok(ProcessedSubscription {
        yaml,
        outcome: ConvertOutcome {
            proxy_count: assembled.proxy_count,
            group_count: assembled.group_count,
            main_group: assembled.main_group,
            rejected: assembled.rejected,
            info,
            header: header.to_string(),
        },
    })
}

/// Processes an already downloaded document and writes the result
pub async fn convert_text(
    text: &str,
    header: &str,
    source_url: &str,
    options: &ConvertOptions,
) -> Result<ConvertOutcome, ConvertError> {
    let processed = process_subscription(text, header, source_url, &options.table, Local::now())?;
    write_output(&options.output_file, &processed.yaml).await?;

    let outcome = processed.outcome;
    info!(
        "Proxies: {}  Groups: {}  Main: {}",
        outcome.proxy_count, outcome.group_count, outcome.main_group
    );
    Ok(outcome)
}

async fn write_output(path: &Path, yaml: &str) -> std::io::Result<()> {
    tokio::fs::write(path, yaml).await?;
    info!("Saved: {}", path.display());
    Ok(())
}

/// Downloads, cleans and saves the subscription at `url`
pub async fn convert(url: &str, options: &ConvertOptions) -> Result<ConvertOutcome, ConvertError> {
    let url = url.trim();
    validate_url(url)?;
    info!("Starting conversion");

    let download_url = prepare_url(url);
    if download_url != url {
        info!("Protocol filter added to the subscription URL");
    }

    info!("Downloading subscription");
    let fetched = fetch_subscription(&download_url).await?;
    info!("Downloaded {} characters", fetched.body.chars().count());

    convert_text(&fetched.body, &fetched.userinfo, url, options).await
}

/// Converts the configured subscription and records its metadata
///
/// Fails with [`ConvertError::AlreadyRunning`] while another conversion
/// holds the slot.
pub async fn refresh(state: &AppState) -> Result<ConvertOutcome, ConvertError> {
    let guard = state
        .try_begin_conversion()
        .ok_or(ConvertError::AlreadyRunning)?;
    refresh_claimed(state, guard).await
}

/// Same as [`refresh`] with the conversion slot already claimed
pub async fn refresh_claimed(
    state: &AppState,
    _guard: ConversionGuard,
) -> Result<ConvertOutcome, ConvertError> {
    let settings = state.settings();
    let options = ConvertOptions {
        output_file: settings.output_file(),
        table: settings.name_table(),
    };
    let outcome = convert(&settings.url, &options).await?;

    state.record_subscription(outcome.header.clone(), outcome.info.clone());
    for line in outcome.info.summary(Local::now()) {
        info!("{}", line);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://host/sub").is_ok());
        assert!(matches!(validate_url("  "), Err(ConvertError::EmptyUrl)));
        assert!(matches!(
            validate_url("http://host/sub"),
            Err(ConvertError::InsecureUrl)
        ));
    }

    #[test]
    fn test_describe_rejected() {
        let rejected = BTreeMap::from([("ssr".to_string(), 2), ("http".to_string(), 1)]);
        assert_eq!(describe_rejected(&rejected), "http(1), ssr(2)");
        assert_eq!(describe_rejected(&BTreeMap::new()), "");
    }

    #[test]
    fn test_process_rejects_non_mapping() {
        let result = process_subscription(
            "- a\n- b",
            "",
            "https://host/sub",
            &NameTable::default(),
            Local::now(),
        );
        assert!(matches!(
            result,
            Err(ConvertError::Document(DocumentError::NotMapping))
        ));
    }
}
