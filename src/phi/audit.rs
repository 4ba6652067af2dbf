//! Audit trail for redaction decisions

use super::models::{PhiCategory, SensitiveSpan};
use crate::domain::Result;
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Audit log entry
///
/// Plaintext never appears here. The input is represented by its SHA-256.
#[derive(Debug, Serialize)]
struct AuditEntry<'a> {
    timestamp: String,
    input_hash: String,
    redacted: bool,
    detections_count: usize,
    categories: BTreeMap<&'a str, usize>,
}

/// Audit logger for outbound-message redaction
///
/// Every record goes to the `aegis::audit` tracing target. When a path is
/// configured, the same record is appended to that file as one JSON line.
#[derive(Debug, Clone, Default)]
pub struct AuditLogger {
    log_path: Option<PathBuf>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: Option<PathBuf>) -> Result<Self> {
        if let Some(parent) = log_path.as_deref().and_then(Path::parent) {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { log_path })
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Record one redaction decision
    pub fn record(&self, input: &str, spans: &[SensitiveSpan], redacted: bool) -> Result<()> {
        let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
        for span in spans {
            *categories.entry(span.category.label()).or_default() += 1;
        }

        let entry = AuditEntry {
            timestamp: Utc::now().to_rfc3339(),
            input_hash: hash_text(input),
            redacted,
            detections_count: spans.len(),
            categories,
        };

        tracing::info!(
            target: "aegis::audit",
            input_hash = %entry.input_hash,
            redacted = entry.redacted,
            detections = entry.detections_count,
            categories = %category_summary(&entry.categories),
            "Outbound message screened"
        );

        if let Some(path) = &self.log_path {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            let line = serde_json::to_string(&entry)?;
            writeln!(file, "{line}")?;
        }

        Ok(())
    }
}

/// Hash text using SHA-256
fn hash_text(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn category_summary(categories: &BTreeMap<&str, usize>) -> String {
    if categories.is_empty() {
        return "none".to_string();
    }
    categories
        .iter()
        .map(|(label, count)| format!("{label}={count}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Distinct categories of a scan, in precedence order
pub fn categories_of(spans: &[SensitiveSpan]) -> Vec<PhiCategory> {
    let mut categories: Vec<_> = spans.iter().map(|s| s.category).collect();
    categories.sort();
    categories.dedup();
    categories
}
