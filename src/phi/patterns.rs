//! Ordered PHI rule table

use super::models::PhiCategory;
use crate::config::RedactionConfig;
use regex::Regex;
use std::ops::Range;

/// Appended to every message that had live PHI
pub const DISCLOSURE_SUFFIX: &str = " [This message was redacted for HIPAA compliance.]";

/// Built-in rules: (category, rule name, pattern), in precedence order.
///
/// Word boundaries and digit classes are ASCII-only. The MRN rule matches any
/// standalone nine-digit run, including ones that are not record numbers.
const BUILTIN_RULES: [(PhiCategory, &str, &str); 9] = [
    (PhiCategory::Ssn, "ssn", r"(?-u)\b\d{3}-\d{2}-\d{4}\b"),
    (PhiCategory::Mrn, "mrn_nine_digits", r"(?-u)\b\d{9}\b"),
    (PhiCategory::PatientId, "patient_id_phrase", r"(?i-u)\bpatient id\b"),
    (PhiCategory::PhiKeyword, "phi_keyword", r"(?i-u)\bphi\b"),
    (PhiCategory::DateOfBirth, "date_of_birth_phrase", r"(?i-u)\bdate of birth\b"),
    (PhiCategory::PhoneNumber, "phone_number_phrase", r"(?i-u)\bphone number\b"),
    (PhiCategory::Email, "email_address_phrase", r"(?i-u)\bemail address\b"),
    (PhiCategory::Address, "address_keyword", r"(?i-u)\baddress\b"),
    (PhiCategory::Insurance, "insurance_keyword", r"(?i-u)\binsurance\b"),
];

/// A single detection rule
#[derive(Debug, Clone)]
pub struct PhiRule {
    pub category: PhiCategory,
    pub name: &'static str,
    pub regex: Regex,
    /// Whether redaction substitutes matches of this rule
    pub substitute: bool,
}

/// The ordered rule table shared by the detector and the redaction engine
///
/// Besides the rules, the table knows the engine's own output markers
/// (placeholders and the disclosure suffix). Text inside those markers is
/// never reported as PHI, so a placeholder cannot re-trigger a rule.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<PhiRule>,
    markers: Regex,
    all_occurrences: bool,
}

impl RuleTable {
    /// Rules with the given redaction policy applied
    pub fn with_policy(policy: &RedactionConfig) -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|&(category, name, pattern)| PhiRule {
                category,
                name,
                regex: Regex::new(pattern).expect("built-in PHI pattern is valid"),
                substitute: match category {
                    PhiCategory::PatientId => policy.redact_patient_id,
                    PhiCategory::DateOfBirth => policy.redact_date_of_birth,
                    _ => true,
                },
            })
            .collect();

        let markers = PhiCategory::ALL
            .iter()
            .map(|c| regex::escape(c.placeholder()))
            .chain(std::iter::once(regex::escape(DISCLOSURE_SUFFIX.trim_start())))
            .collect::<Vec<_>>()
            .join("|");

        Self {
            rules,
            markers: Regex::new(&markers).expect("redaction marker pattern is valid"),
            all_occurrences: policy.redact_all_occurrences,
        }
    }

    /// Rules in precedence order
    pub fn rules(&self) -> &[PhiRule] {
        &self.rules
    }

    /// The rule for a category
    pub fn rule(&self, category: PhiCategory) -> Option<&PhiRule> {
        self.rules.iter().find(|r| r.category == category)
    }

    /// Whether every occurrence is substituted rather than the first
    pub fn all_occurrences(&self) -> bool {
        self.all_occurrences
    }

    /// Byte ranges of redaction markers already present in `text`
    pub(crate) fn marker_ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.markers.find_iter(text).map(|m| m.range()).collect()
    }

    /// Matches of `rule` in `text` that do not overlap a marker
    pub(crate) fn live_matches<'a>(
        &'a self,
        rule: &'a PhiRule,
        text: &'a str,
        markers: &'a [Range<usize>],
    ) -> impl Iterator<Item = Range<usize>> + 'a {
        rule.regex
            .find_iter(text)
            .map(|m| m.range())
            .filter(move |m| !markers.iter().any(|r| m.start < r.end && r.start < m.end))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::with_policy(&RedactionConfig::default())
    }
}
