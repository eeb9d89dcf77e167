//! In-memory report store over a loaded [`Dataset`].

use std::path::Path;

use hazardlens_core::{ClusterInfo, ClusterReports, HazardReport};
use tracing::debug;

use crate::{Dataset, StoreError};

/// Read-only access to clusters and their member reports.
///
/// `cluster_reports` hands back the representative and the candidates as
/// separate fields; callers never rely on list position.
pub trait ReportSource {
    fn cluster_info(&self, cluster_id: &str) -> Result<ClusterInfo, StoreError>;

    /// Members of a cluster, or `None` when the cluster has no reports.
    fn cluster_reports(&self, cluster_id: &str) -> Result<Option<ClusterReports>, StoreError>;
}

/// Snapshot store backed by a [`Dataset`].
///
/// The dataset is never mutated after loading.
pub struct ReportStore {
    dataset: Dataset,
}

impl ReportStore {
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Load a dataset file into a new store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::from_dataset(Dataset::load(path)?))
    }

    pub fn clusters(&self) -> &[ClusterInfo] {
        &self.dataset.clusters
    }

    /// The main report list, in file order.
    pub fn reports(&self) -> &[HazardReport] {
        &self.dataset.reports
    }

    /// Look up a report by id, checking the main list before cluster lists.
    pub fn report(&self, id: &str) -> Result<&HazardReport, StoreError> {
        self.dataset
            .reports
            .iter()
            .chain(self.dataset.cluster_reports.values().flatten())
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::UnknownReport(id.to_string()))
    }

    /// Ordered members of a cluster: the explicit list when the dataset has
    /// one, otherwise main-list reports tagged with the cluster.
    pub fn cluster_members(&self, cluster_id: &str) -> Result<Vec<HazardReport>, StoreError> {
        if let Some(members) = self.dataset.cluster_reports.get(cluster_id) {
            debug!(cluster_id, count = members.len(), "using ordered member list");
            return Ok(members.clone());
        }
        if !self.dataset.clusters.iter().any(|c| c.id == cluster_id) {
            return Err(StoreError::UnknownCluster(cluster_id.to_string()));
        }
        let members: Vec<HazardReport> = self
            .dataset
            .reports
            .iter()
            .filter(|r| r.cluster.as_deref() == Some(cluster_id))
            .cloned()
            .collect();
        debug!(cluster_id, count = members.len(), "filtered members from report list");
        Ok(members)
    }
}

impl ReportSource for ReportStore {
    fn cluster_info(&self, cluster_id: &str) -> Result<ClusterInfo, StoreError> {
        self.dataset
            .clusters
            .iter()
            .find(|c| c.id == cluster_id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownCluster(cluster_id.to_string()))
    }

    fn cluster_reports(&self, cluster_id: &str) -> Result<Option<ClusterReports>, StoreError> {
        Ok(ClusterReports::from_ordered(
            self.cluster_members(cluster_id)?,
        ))
    }
}
