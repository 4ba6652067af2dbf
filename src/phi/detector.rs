//! PHI detection

use super::models::SensitiveSpan;
use super::patterns::RuleTable;
use std::sync::Arc;

/// Stateless PHI classifier over the ordered rule table
///
/// Pure: no I/O, and the same input always yields the same answer. Cheap to
/// clone; clones share the compiled rules.
#[derive(Debug, Clone)]
pub struct PhiDetector {
    table: Arc<RuleTable>,
}

impl PhiDetector {
    /// Detector over the default rule table
    pub fn new() -> Self {
        Self::with_table(Arc::new(RuleTable::default()))
    }

    pub fn with_table(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<RuleTable> {
        &self.table
    }

    /// Whether any rule matches live text
    ///
    /// Redaction placeholders and the disclosure notice are not live text.
    pub fn detect(&self, text: &str) -> bool {
        let markers = self.table.marker_ranges(text);
        self.table
            .rules()
            .iter()
            .any(|rule| self.table.live_matches(rule, text, &markers).next().is_some())
    }

    /// Every live match, in rule precedence order then position
    pub fn scan(&self, text: &str) -> Vec<SensitiveSpan> {
        let markers = self.table.marker_ranges(text);
        self.table
            .rules()
            .iter()
            .flat_map(|rule| {
                self.table
                    .live_matches(rule, text, &markers)
                    .map(|range| SensitiveSpan {
                        category: rule.category,
                        rule: rule.name.to_string(),
                        start: range.start,
                        end: range.end,
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl Default for PhiDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phi::models::PhiCategory;

    #[test]
    fn test_detect_ssn() {
        let detector = PhiDetector::new();
        assert!(detector.detect("SSN: 123-45-6789"));
    }

    #[test]
    fn test_detect_keywords_case_insensitive() {
        let detector = PhiDetector::new();
        assert!(detector.detect("What is the patient's INSURANCE provider?"));
        assert!(detector.detect("Enter your Date Of Birth"));
        assert!(detector.detect("patient id please"));
    }

    #[test]
    fn test_clean_text() {
        let detector = PhiDetector::new();
        assert!(!detector.detect("What are the side effects of tamoxifen?"));
        assert!(!detector.detect(""));
    }

    #[test]
    fn test_placeholders_are_not_phi() {
        let detector = PhiDetector::new();
        assert!(!detector.detect(
            "[REDACTED PHI] [REDACTED ADDRESS] [This message was redacted for HIPAA compliance.]"
        ));
    }

    #[test]
    fn test_scan_reports_positions_and_rules() {
        let detector = PhiDetector::new();
        let text = "SSN 123-45-6789, home address";
        let spans = detector.scan(text);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].category, PhiCategory::Ssn);
        assert_eq!(spans[0].rule, "ssn");
        assert_eq!(&text[spans[0].start..spans[0].end], "123-45-6789");
        assert_eq!(spans[1].category, PhiCategory::Address);
    }

    #[test]
    fn test_scan_counts_repeated_matches() {
        let detector = PhiDetector::new();
        let spans = detector.scan("phi, PHI and Phi");
        assert_eq!(spans.len(), 3);
        assert!(spans.iter().all(|s| s.category == PhiCategory::PhiKeyword));
    }

    #[test]
    fn test_email_address_also_matches_address_rule() {
        let detector = PhiDetector::new();
        let categories: Vec<_> = detector
            .scan("my email address")
            .into_iter()
            .map(|s| s.category)
            .collect();
        assert_eq!(categories, vec![PhiCategory::Email, PhiCategory::Address]);
    }
}
