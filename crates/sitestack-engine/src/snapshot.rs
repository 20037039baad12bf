//! State snapshot recorded by the simulated engine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sitestack_graph::ResourceKind;

/// One provisioned resource in the snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    /// Logical name of the declaration.
    pub logical_name: String,
    /// Resource type.
    pub kind: ResourceKind,
    /// Physical identifier generated or confirmed at apply time.
    pub physical_id: String,
    /// Resolved attributes of the resource.
    pub attributes: BTreeMap<String, String>,
    /// When the resource was applied.
    pub created_at: DateTime<Utc>,
}

/// The state recorded by an apply pass, in apply order.
///
/// A real reconciliation engine would persist this and diff the next plan
/// against it; the simulated engine only exposes it for inspection.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    resources: Vec<ResourceRecord>,
}

impl StateSnapshot {
    /// Append a record.
    pub fn record(&mut self, record: ResourceRecord) {
        self.resources.push(record);
    }

    /// All records, in apply order.
    #[must_use]
    pub fn resources(&self) -> &[ResourceRecord] {
        &self.resources
    }

    /// The record for a logical name, if present.
    #[must_use]
    pub fn find(&self, logical_name: &str) -> Option<&ResourceRecord> {
        self.resources
            .iter()
            .find(|record| record.logical_name == logical_name)
    }

    /// Number of recorded resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether anything was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_find_recorded_resource() {
        let mut snapshot = StateSnapshot::default();
        snapshot.record(ResourceRecord {
            logical_name: "siteBucket".to_owned(),
            kind: ResourceKind::Bucket,
            physical_id: "sitebucket-1a2b3c4d".to_owned(),
            attributes: BTreeMap::new(),
            created_at: Utc::now(),
        });

        assert_eq!(snapshot.len(), 1);
        let record = snapshot.find("siteBucket").expect("recorded resource");
        assert_eq!(record.physical_id, "sitebucket-1a2b3c4d");
        assert!(snapshot.find("cdn").is_none());
    }
}
