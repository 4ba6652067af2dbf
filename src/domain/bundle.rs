//! FHIR diagnostic report bundle

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A FHIR `Bundle` returned by a `DiagnosticReport` search
///
/// Only the fields the gateway inspects are typed; every other member of the
/// bundle is retained in `extra` so that rendering shows the full response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Always `"Bundle"` for a conformant server
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Search result entries; absent, null and empty are treated alike
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub entry: Vec<BundleEntry>,

    /// Remaining bundle members (`type`, `total`, `link`, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One entry of a search bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    /// The `DiagnosticReport` (or `OperationOutcome`) resource
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub resource: Value,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Bundle {
    /// Number of entries in the bundle
    pub fn len(&self) -> usize {
        self.entry.len()
    }

    /// Whether the bundle carries no entries at all
    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }
}

fn default_resource_type() -> String {
    "Bundle".to_string()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<BundleEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<BundleEntry>>::deserialize(deserializer)?.unwrap_or_default())
}
