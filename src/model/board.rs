use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reduced board shape returned by `organizations/{id}/boards`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub id_organization: Option<String>,
}

impl BoardSummary {
    /// True when the board declares an organization and that organization
    /// is one of `targets`.
    pub fn belongs_to(&self, targets: &[String]) -> bool {
        match self.id_organization.as_deref() {
            Some(org) if !org.is_empty() => targets.iter().any(|t| t == org),
            _ => false,
        }
    }
}

/// The full board document exactly as the service returned it.
///
/// Kept as an untyped tree so fields added by the service are backed up
/// without code changes. `serde_json::Map` keeps keys sorted, which gives
/// the snapshot files their stable key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardSnapshot(pub Value);

impl BoardSnapshot {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Number of entries in the `actions` array, if present.
    pub fn action_count(&self) -> usize {
        self.0
            .get("actions")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}
