//! Review session for one cluster.
//!
//! A session is a two-state machine:
//!
//! - `List` (initial): representative plus ranked candidates.
//! - `Compare`: representative and one selected candidate side by side.
//!
//! `select_candidate` moves List → Compare, `clear_selection` moves back.
//! The active dimension and the computed rank order are kept across the
//! round trip. Dismissal is reported to the container as
//! [`ReviewEvent::Close`]; the session itself has no terminal state.

use hazardlens_core::{ClusterInfo, ClusterReports, HazardReport, SimilarityDimension};
use hazardlens_store::ReportSource;
use tracing::{debug, info};

use crate::ReviewError;
use crate::compare::Comparison;
use crate::rank::{RankedCandidate, ranking_order};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewView {
    List,
    Compare { candidate_id: String },
}

/// Outbound events for the container to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewEvent {
    Close,
    ConfirmDuplicate {
        representative_id: String,
        candidate_id: String,
    },
    RejectDuplicate {
        representative_id: String,
        candidate_id: String,
    },
}

/// What the current view shows.
#[derive(Debug)]
pub enum ReviewScreen<'a> {
    /// The cluster has no reports.
    Empty { cluster: &'a ClusterInfo },
    List {
        cluster: &'a ClusterInfo,
        representative: &'a HazardReport,
        sort: SimilarityDimension,
        candidates: Vec<RankedCandidate<'a>>,
    },
    Compare {
        cluster: &'a ClusterInfo,
        comparison: Comparison<'a>,
    },
}

pub struct ReviewSession {
    cluster: ClusterInfo,
    members: Option<ClusterReports>,
    sort: SimilarityDimension,
    /// Indices into `members.candidates`, in rank order for `sort`.
    ranking: Vec<usize>,
    view: ReviewView,
}

impl ReviewSession {
    /// Start a session in list mode, ranked by the default dimension.
    pub fn new(cluster: ClusterInfo, members: Option<ClusterReports>) -> Self {
        let sort = SimilarityDimension::default();
        let ranking = members
            .as_ref()
            .map(|m| ranking_order(&m.candidates, sort))
            .unwrap_or_default();
        Self {
            cluster,
            members,
            sort,
            ranking,
            view: ReviewView::List,
        }
    }

    /// Fetch a cluster and its members from `source` and start a session.
    pub fn open<S: ReportSource + ?Sized>(source: &S, cluster_id: &str) -> Result<Self, ReviewError> {
        let cluster = source.cluster_info(cluster_id)?;
        let members = source.cluster_reports(cluster_id)?;
        info!(
            cluster_id,
            members = members.as_ref().map_or(0, ClusterReports::len),
            "opened review session"
        );
        Ok(Self::new(cluster, members))
    }

    pub fn cluster(&self) -> &ClusterInfo {
        &self.cluster
    }

    pub fn representative(&self) -> Option<&HazardReport> {
        self.members.as_ref().map(|m| &m.representative)
    }

    pub fn sort_dimension(&self) -> SimilarityDimension {
        self.sort
    }

    pub fn view(&self) -> &ReviewView {
        &self.view
    }

    /// Re-rank candidates along `dimension`. The view state is unchanged.
    pub fn set_sort_dimension(&mut self, dimension: SimilarityDimension) {
        if dimension == self.sort {
            return;
        }
        self.sort = dimension;
        self.ranking = self
            .members
            .as_ref()
            .map(|m| ranking_order(&m.candidates, dimension))
            .unwrap_or_default();
        debug!(cluster_id = %self.cluster.id, dimension = %dimension, "re-ranked candidates");
    }

    /// Candidates in the current rank order.
    pub fn ranked_candidates(&self) -> Vec<RankedCandidate<'_>> {
        let Some(members) = &self.members else {
            return Vec::new();
        };
        self.ranking
            .iter()
            .map(|&i| {
                let report = &members.candidates[i];
                RankedCandidate {
                    report,
                    score: report.score(self.sort),
                }
            })
            .collect()
    }

    /// Enter compare mode for a candidate of this cluster.
    pub fn select_candidate(&mut self, candidate_id: &str) -> Result<(), ReviewError> {
        if let ReviewView::Compare { candidate_id: current } = &self.view {
            return Err(ReviewError::AlreadyComparing(current.clone()));
        }
        let known = self
            .members
            .as_ref()
            .and_then(|m| m.candidate(candidate_id))
            .is_some();
        if !known {
            return Err(ReviewError::NotACandidate(candidate_id.to_string()));
        }
        debug!(cluster_id = %self.cluster.id, candidate_id, "entering compare view");
        self.view = ReviewView::Compare {
            candidate_id: candidate_id.to_string(),
        };
        Ok(())
    }

    /// Return to list mode. No-op when already listing.
    pub fn clear_selection(&mut self) {
        if self.view != ReviewView::List {
            debug!(cluster_id = %self.cluster.id, "back to list view");
            self.view = ReviewView::List;
        }
    }

    fn compared_pair(&self) -> Result<(&HazardReport, &HazardReport), ReviewError> {
        let ReviewView::Compare { candidate_id } = &self.view else {
            return Err(ReviewError::NotComparing);
        };
        let members = self.members.as_ref().ok_or(ReviewError::NotComparing)?;
        let candidate = members
            .candidate(candidate_id)
            .ok_or_else(|| ReviewError::NotACandidate(candidate_id.clone()))?;
        Ok((&members.representative, candidate))
    }

    /// Decide that the compared candidate duplicates the representative.
    pub fn confirm_duplicate(&self) -> Result<ReviewEvent, ReviewError> {
        let (rep, cand) = self.compared_pair()?;
        Ok(ReviewEvent::ConfirmDuplicate {
            representative_id: rep.id.clone(),
            candidate_id: cand.id.clone(),
        })
    }

    /// Decide that the compared candidate is not a duplicate.
    pub fn reject_duplicate(&self) -> Result<ReviewEvent, ReviewError> {
        let (rep, cand) = self.compared_pair()?;
        Ok(ReviewEvent::RejectDuplicate {
            representative_id: rep.id.clone(),
            candidate_id: cand.id.clone(),
        })
    }

    pub fn close(&self) -> ReviewEvent {
        ReviewEvent::Close
    }

    pub fn screen(&self) -> ReviewScreen<'_> {
        let Some(members) = &self.members else {
            return ReviewScreen::Empty {
                cluster: &self.cluster,
            };
        };
        match self.compared_pair() {
            Ok((representative, candidate)) => ReviewScreen::Compare {
                cluster: &self.cluster,
                comparison: Comparison::new(representative, candidate),
            },
            Err(_) => ReviewScreen::List {
                cluster: &self.cluster,
                representative: &members.representative,
                sort: self.sort,
                candidates: self.ranked_candidates(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::tests::{candidate, flat};
    use hazardlens_core::{ClusterComponents, ClusterStatus, DuplicateScoreSet};
    use hazardlens_store::{ReportStore, StoreError};
    use std::path::PathBuf;

    fn cluster_info(id: &str) -> ClusterInfo {
        ClusterInfo {
            id: id.into(),
            name: "Pelanggaran Kecepatan Area Gerbang".into(),
            report_count: 5,
            similarity_score: 0.87,
            status: ClusterStatus::StrongDuplicate,
            components: ClusterComponents {
                location_radius: 1.0,
                location_name: 1.0,
                detail_location: 0.5,
                location_description: 0.8,
                non_compliance: 1.0,
                sub_non_compliance: 1.0,
                image_context: 0.7,
                finding_description: 0.9,
            },
        }
    }

    fn scored(id: &str, semantic: f64, geo: f64) -> HazardReport {
        candidate(
            id,
            Some(DuplicateScoreSet {
                overall: 0.8,
                rule_based: 0.8,
                geo,
                lexical: 0.8,
                semantic,
            }),
        )
    }

    /// Cluster C-001: representative plus four candidates.
    struct FixedSource {
        reports: Vec<HazardReport>,
    }

    impl ReportSource for FixedSource {
        fn cluster_info(&self, cluster_id: &str) -> Result<ClusterInfo, StoreError> {
            if cluster_id == "C-001" {
                Ok(cluster_info(cluster_id))
            } else {
                Err(StoreError::UnknownCluster(cluster_id.into()))
            }
        }

        fn cluster_reports(&self, _cluster_id: &str) -> Result<Option<ClusterReports>, StoreError> {
            Ok(ClusterReports::from_ordered(self.reports.clone()))
        }
    }

    fn c001() -> FixedSource {
        FixedSource {
            reports: vec![
                scored("HR-REP", 1.0, 1.0),
                scored("HR-1", 0.85, 0.90),
                scored("HR-2", 0.92, 0.92),
                scored("HR-3", 0.75, 0.85),
                scored("HR-4", 0.83, 0.88),
            ],
        }
    }

    fn ranked_scores(session: &ReviewSession) -> Vec<f64> {
        session
            .ranked_candidates()
            .iter()
            .map(|c| c.score.unwrap())
            .collect()
    }

    fn ranked_ids(session: &ReviewSession) -> Vec<String> {
        session
            .ranked_candidates()
            .iter()
            .map(|c| c.report.id.clone())
            .collect()
    }

    #[test]
    fn end_to_end_semantic_then_geo() {
        let mut session = ReviewSession::open(&c001(), "C-001").unwrap();
        assert_eq!(session.sort_dimension(), SimilarityDimension::Semantic);
        assert_eq!(ranked_scores(&session), vec![0.92, 0.85, 0.83, 0.75]);
        assert_eq!(session.representative().unwrap().id, "HR-REP");
        assert!(!ranked_ids(&session).contains(&"HR-REP".to_string()));

        session.set_sort_dimension(SimilarityDimension::Geo);
        assert_eq!(ranked_scores(&session), vec![0.92, 0.90, 0.88, 0.85]);
        assert_eq!(session.representative().unwrap().id, "HR-REP");
        assert!(!ranked_ids(&session).contains(&"HR-REP".to_string()));
    }

    #[test]
    fn representative_survives_every_dimension() {
        let mut session = ReviewSession::open(&c001(), "C-001").unwrap();
        for dim in SimilarityDimension::ALL {
            session.set_sort_dimension(dim);
            assert_eq!(session.representative().unwrap().id, "HR-REP");
            assert_eq!(session.ranked_candidates().len(), 4);
        }
    }

    #[test]
    fn compare_round_trip_keeps_order_and_dimension() {
        let mut session = ReviewSession::open(&c001(), "C-001").unwrap();
        session.set_sort_dimension(SimilarityDimension::Geo);
        let before = ranked_ids(&session);

        session.select_candidate("HR-4").unwrap();
        assert_eq!(
            session.view(),
            &ReviewView::Compare {
                candidate_id: "HR-4".into()
            }
        );
        match session.screen() {
            ReviewScreen::Compare { comparison, .. } => {
                assert_eq!(comparison.representative.id, "HR-REP");
                assert_eq!(comparison.candidate.id, "HR-4");
                assert_eq!(comparison.score(SimilarityDimension::Geo).percent(), 88);
            }
            other => panic!("expected compare screen, got {other:?}"),
        }

        session.clear_selection();
        assert_eq!(session.view(), &ReviewView::List);
        assert_eq!(session.sort_dimension(), SimilarityDimension::Geo);
        assert_eq!(ranked_ids(&session), before);
    }

    #[test]
    fn list_screen_carries_ranked_candidates() {
        let session = ReviewSession::open(&c001(), "C-001").unwrap();
        match session.screen() {
            ReviewScreen::List {
                representative,
                sort,
                candidates,
                ..
            } => {
                assert_eq!(representative.id, "HR-REP");
                assert_eq!(sort, SimilarityDimension::Semantic);
                assert_eq!(candidates[0].report.id, "HR-2");
            }
            other => panic!("expected list screen, got {other:?}"),
        }
    }

    #[test]
    fn selecting_non_candidates_is_rejected() {
        let mut session = ReviewSession::open(&c001(), "C-001").unwrap();
        assert!(matches!(
            session.select_candidate("HR-REP"),
            Err(ReviewError::NotACandidate(id)) if id == "HR-REP"
        ));
        assert!(matches!(
            session.select_candidate("HR-404"),
            Err(ReviewError::NotACandidate(_))
        ));
        assert_eq!(session.view(), &ReviewView::List);
    }

    #[test]
    fn selecting_while_comparing_is_rejected() {
        let mut session = ReviewSession::open(&c001(), "C-001").unwrap();
        session.select_candidate("HR-1").unwrap();
        assert!(matches!(
            session.select_candidate("HR-2"),
            Err(ReviewError::AlreadyComparing(id)) if id == "HR-1"
        ));
        assert_eq!(
            session.view(),
            &ReviewView::Compare {
                candidate_id: "HR-1".into()
            }
        );
    }

    #[test]
    fn decisions_require_compare_mode() {
        let mut session = ReviewSession::open(&c001(), "C-001").unwrap();
        assert!(matches!(
            session.confirm_duplicate(),
            Err(ReviewError::NotComparing)
        ));
        assert!(matches!(
            session.reject_duplicate(),
            Err(ReviewError::NotComparing)
        ));

        session.select_candidate("HR-3").unwrap();
        assert_eq!(
            session.confirm_duplicate().unwrap(),
            ReviewEvent::ConfirmDuplicate {
                representative_id: "HR-REP".into(),
                candidate_id: "HR-3".into(),
            }
        );
        assert_eq!(
            session.reject_duplicate().unwrap(),
            ReviewEvent::RejectDuplicate {
                representative_id: "HR-REP".into(),
                candidate_id: "HR-3".into(),
            }
        );
        assert_eq!(session.close(), ReviewEvent::Close);
    }

    #[test]
    fn empty_cluster_renders_empty_screen() {
        let mut session = ReviewSession::new(cluster_info("C-009"), None);
        assert!(session.representative().is_none());
        assert!(session.ranked_candidates().is_empty());
        assert!(matches!(session.screen(), ReviewScreen::Empty { .. }));
        session.set_sort_dimension(SimilarityDimension::Lexical);
        assert!(matches!(
            session.select_candidate("HR-1"),
            Err(ReviewError::NotACandidate(_))
        ));
        assert_eq!(session.close(), ReviewEvent::Close);
    }

    #[test]
    fn singleton_cluster_lists_no_candidates() {
        let members = ClusterReports::from_ordered(vec![flat("HR-REP", 1.0)]);
        let session = ReviewSession::new(cluster_info("C-004"), members);
        match session.screen() {
            ReviewScreen::List { candidates, .. } => assert!(candidates.is_empty()),
            other => panic!("expected list screen, got {other:?}"),
        }
    }

    #[test]
    fn unscored_candidates_rank_last() {
        let members = ClusterReports::from_ordered(vec![
            flat("HR-REP", 1.0),
            candidate("HR-NONE", None),
            flat("HR-LOW", 0.2),
        ]);
        let session = ReviewSession::new(cluster_info("C-001"), members);
        assert_eq!(ranked_ids(&session), vec!["HR-LOW", "HR-NONE"]);
    }

    #[test]
    fn unknown_cluster_is_a_store_error() {
        let result = ReviewSession::open(&c001(), "C-404");
        assert!(matches!(
            result,
            Err(ReviewError::Store(StoreError::UnknownCluster(_)))
        ));
    }

    #[test]
    fn bundled_dataset_c001() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("data")
            .join("reports.json");
        let store = ReportStore::open(&path).unwrap();
        let mut session = ReviewSession::open(&store, "C-001").unwrap();
        assert_eq!(session.representative().unwrap().id, "HR-2025-336-23917");
        assert_eq!(
            ranked_ids(&session),
            vec![
                "HR-2025-336-23930",
                "HR-2025-336-23932",
                "HR-2025-336-23920",
                "HR-2025-336-23931"
            ]
        );

        session.set_sort_dimension(SimilarityDimension::Overall);
        assert_eq!(
            ranked_ids(&session),
            vec![
                "HR-2025-336-23930",
                "HR-2025-336-23932",
                "HR-2025-336-23920",
                "HR-2025-336-23931"
            ]
        );

        session.set_sort_dimension(SimilarityDimension::Geo);
        assert_eq!(
            ranked_ids(&session),
            vec![
                "HR-2025-336-23920",
                "HR-2025-336-23930",
                "HR-2025-336-23931",
                "HR-2025-336-23932"
            ]
        );
    }
}
