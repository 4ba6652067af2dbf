//! PHI data models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sensitive-information category
///
/// The taxonomy is closed. Declaration order is precedence: when rules are
/// applied, earlier categories run first, so "email address" is consumed by
/// [`PhiCategory::Email`] before [`PhiCategory::Address`] sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhiCategory {
    /// US Social Security Number shaped digit groups (`123-45-6789`)
    Ssn,
    /// Nine-digit medical record number shaped runs
    Mrn,
    /// The phrase "patient id"
    PatientId,
    /// The word "phi"
    PhiKeyword,
    /// The phrase "date of birth"
    DateOfBirth,
    /// The phrase "phone number"
    PhoneNumber,
    /// The phrase "email address"
    Email,
    /// The word "address"
    Address,
    /// The word "insurance"
    Insurance,
}

impl PhiCategory {
    /// All categories in precedence order
    pub const ALL: [PhiCategory; 9] = [
        Self::Ssn,
        Self::Mrn,
        Self::PatientId,
        Self::PhiKeyword,
        Self::DateOfBirth,
        Self::PhoneNumber,
        Self::Email,
        Self::Address,
        Self::Insurance,
    ];

    /// Short label used in audit records
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ssn => "SSN",
            Self::Mrn => "MRN",
            Self::PatientId => "PATIENT_ID",
            Self::PhiKeyword => "PHI",
            Self::DateOfBirth => "DOB",
            Self::PhoneNumber => "PHONE",
            Self::Email => "EMAIL",
            Self::Address => "ADDRESS",
            Self::Insurance => "INSURANCE",
        }
    }

    /// Placeholder substituted for a match of this category
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Ssn => "[REDACTED SSN]",
            Self::Mrn => "[REDACTED MRN]",
            Self::PatientId => "[REDACTED PATIENT ID]",
            Self::PhiKeyword => "[REDACTED PHI]",
            Self::DateOfBirth => "[REDACTED DOB]",
            Self::PhoneNumber => "[REDACTED PHONE]",
            Self::Email => "[REDACTED EMAIL]",
            Self::Address => "[REDACTED ADDRESS]",
            Self::Insurance => "[REDACTED INSURANCE]",
        }
    }
}

impl fmt::Display for PhiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A detected sensitive span
///
/// Carries positions only. The matched text itself is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveSpan {
    pub category: PhiCategory,
    /// Name of the rule that matched
    pub rule: String,
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
}

/// Output of the redaction engine
///
/// The input text is not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactedMessage {
    text: String,
    was_redacted: bool,
}

impl RedactedMessage {
    pub(crate) fn new(text: String, was_redacted: bool) -> Self {
        Self { text, was_redacted }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether live PHI was detected in the input
    pub fn was_redacted(&self) -> bool {
        self.was_redacted
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for RedactedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
