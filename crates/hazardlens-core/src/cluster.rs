//! Duplicate-report clusters.

use serde::{Deserialize, Serialize};

use crate::report::HazardReport;

/// Duplicate verdict attached to a cluster by the upstream scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterStatus {
    StrongDuplicate,
    PossibleDuplicate,
    NotDuplicate,
}

impl ClusterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrongDuplicate => "strong duplicate",
            Self::PossibleDuplicate => "possible duplicate",
            Self::NotDuplicate => "not duplicate",
        }
    }
}

/// Contributions to a cluster's aggregate similarity, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterComponents {
    pub location_radius: f64,
    pub location_name: f64,
    pub detail_location: f64,
    pub location_description: f64,
    pub non_compliance: f64,
    pub sub_non_compliance: f64,
    pub image_context: f64,
    pub finding_description: f64,
}

impl ClusterComponents {
    /// `(label, value)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("location radius", self.location_radius),
            ("location name", self.location_name),
            ("detail location", self.detail_location),
            ("location description", self.location_description),
            ("non-compliance", self.non_compliance),
            ("sub non-compliance", self.sub_non_compliance),
            ("image context", self.image_context),
            ("finding description", self.finding_description),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub id: String,
    pub name: String,
    pub report_count: u32,
    pub similarity_score: f64,
    pub status: ClusterStatus,
    pub components: ClusterComponents,
}

/// A non-empty cluster split into its representative and the remaining
/// candidates, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterReports {
    pub representative: HazardReport,
    pub candidates: Vec<HazardReport>,
}

impl ClusterReports {
    /// Split an ordered member list: element 0 is the representative.
    ///
    /// Returns `None` for an empty list.
    pub fn from_ordered(reports: Vec<HazardReport>) -> Option<Self> {
        let mut iter = reports.into_iter();
        let representative = iter.next()?;
        Some(Self {
            representative,
            candidates: iter.collect(),
        })
    }

    pub fn candidate(&self, id: &str) -> Option<&HazardReport> {
        self.candidates.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        1 + self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
