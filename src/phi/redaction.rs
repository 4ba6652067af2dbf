//! HIPAA redaction engine

use super::detector::PhiDetector;
use super::models::RedactedMessage;
use super::patterns::{RuleTable, DISCLOSURE_SUFFIX};
use crate::config::RedactionConfig;
use std::sync::Arc;

/// Deterministic text transformer built on the PHI rule table
///
/// For text with live PHI, each substituting rule replaces its first live
/// match (or every live match, if the policy says so) in precedence order,
/// and the disclosure notice is appended once. Text without live PHI is
/// returned unchanged. Applying the engine to its own output changes nothing
/// further unless the output still holds unsubstituted PHI.
#[derive(Debug, Clone)]
pub struct RedactionEngine {
    detector: PhiDetector,
}

impl RedactionEngine {
    /// Engine with the default policy
    pub fn new() -> Self {
        Self::with_policy(&RedactionConfig::default())
    }

    pub fn with_policy(policy: &RedactionConfig) -> Self {
        Self {
            detector: PhiDetector::with_table(Arc::new(RuleTable::with_policy(policy))),
        }
    }

    /// The detector sharing this engine's rules
    pub fn detector(&self) -> &PhiDetector {
        &self.detector
    }

    pub fn redact(&self, text: &str) -> RedactedMessage {
        if !self.detector.detect(text) {
            return RedactedMessage::new(text.to_string(), false);
        }

        let table = self.detector.table();
        let mut output = text.to_string();

        for rule in table.rules().iter().filter(|r| r.substitute) {
            loop {
                let markers = table.marker_ranges(&output);
                let Some(range) = table.live_matches(rule, &output, &markers).next() else {
                    break;
                };
                output.replace_range(range, rule.category.placeholder());
                if !table.all_occurrences() {
                    break;
                }
            }
        }

        if !output.ends_with(DISCLOSURE_SUFFIX) {
            output.push_str(DISCLOSURE_SUFFIX);
        }

        RedactedMessage::new(output, true)
    }
}

impl Default for RedactionEngine {
    fn default() -> Self {
        Self::new()
    }
}
