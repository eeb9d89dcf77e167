//! On-disk dataset snapshot.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use hazardlens_core::{ClusterInfo, HazardReport};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::StoreError;

/// Everything the store serves, loaded once from a JSON document.
///
/// `cluster_reports` holds explicit ordered member lists. A cluster without
/// one is served from `reports`, filtered by the `cluster` field in file
/// order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub clusters: Vec<ClusterInfo>,
    #[serde(default)]
    pub reports: Vec<HazardReport>,
    #[serde(default)]
    pub cluster_reports: BTreeMap<String, Vec<HazardReport>>,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.check_unique_ids()?;
        Ok(dataset)
    }

    /// Report ids must be unique in the main list and within each ordered
    /// cluster list. The same report may appear in both.
    fn check_unique_ids(&self) -> Result<(), StoreError> {
        unique_ids("reports", &self.reports)?;
        for (cluster_id, members) in &self.cluster_reports {
            unique_ids(cluster_id, members)?;
        }
        Ok(())
    }

    /// Read a dataset file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::DatasetNotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        let dataset = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            clusters = dataset.clusters.len(),
            reports = dataset.reports.len(),
            ordered_clusters = dataset.cluster_reports.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }
}

fn unique_ids(scope: &str, reports: &[HazardReport]) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for r in reports {
        if !seen.insert(r.id.as_str()) {
            return Err(StoreError::DuplicateReport {
                scope: scope.to_string(),
                id: r.id.clone(),
            });
        }
    }
    Ok(())
}
