//! Candidate ranking by similarity dimension.
//!
//! Candidates are ordered by descending score along the active dimension.
//! The sort is stable, so equal scores keep their source order. Candidates
//! without a score are "unset", not zero: they go after every scored
//! candidate, again in source order.

use std::cmp::Ordering;

use hazardlens_core::{HazardReport, ScoreTier, SimilarityDimension, score_percent, score_to_tier};

/// A candidate together with its score along the ranking dimension.
#[derive(Debug, Clone, Copy)]
pub struct RankedCandidate<'a> {
    pub report: &'a HazardReport,
    pub score: Option<f64>,
}

impl RankedCandidate<'_> {
    pub fn percent(&self) -> u32 {
        score_percent(self.score)
    }

    /// `None` for an unscored candidate.
    pub fn tier(&self) -> Option<ScoreTier> {
        self.score.map(score_to_tier)
    }
}

/// Descending by score, unset last.
fn by_score_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Indices into `candidates` in ranked order.
pub fn ranking_order(candidates: &[HazardReport], dimension: SimilarityDimension) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    // `sort_by` is stable.
    order.sort_by(|&a, &b| {
        by_score_desc(
            candidates[a].score(dimension),
            candidates[b].score(dimension),
        )
    });
    order
}

/// Rank candidates along `dimension`. Pure; the input is left untouched.
pub fn rank_candidates(
    candidates: &[HazardReport],
    dimension: SimilarityDimension,
) -> Vec<RankedCandidate<'_>> {
    ranking_order(candidates, dimension)
        .into_iter()
        .map(|i| RankedCandidate {
            report: &candidates[i],
            score: candidates[i].score(dimension),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use hazardlens_core::{AiStatus, DuplicateScoreSet};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    pub(crate) fn candidate(id: &str, scores: Option<DuplicateScoreSet>) -> HazardReport {
        HazardReport {
            id: id.into(),
            date: "01 Des 2025".into(),
            timestamp: None,
            reporter: "Eka Putra".into(),
            reporter_role: "Gate Keeper".into(),
            site: "BMO 1".into(),
            location: "(B 65) Area Gerbang".into(),
            location_code: "B65".into(),
            area: None,
            location_detail: None,
            hazard_type: "Pengoperasian Kendaraan".into(),
            hazard_subtype: "Speeding".into(),
            description: None,
            quick_action: "Warning".into(),
            non_compliance: None,
            sub_non_compliance: None,
            cluster: Some("C-001".into()),
            ai_status: AiStatus::Done,
            ai_batch: None,
            labels: Vec::new(),
            confidence_score: None,
            knowledge_sources: Vec::new(),
            cluster_suggestion: None,
            evaluation_status: None,
            evaluator_name: None,
            sla_status: None,
            sla_due_date: None,
            assigned_to: None,
            longitude: None,
            latitude: None,
            duplicate_scores: scores,
        }
    }

    /// Same score on every dimension.
    pub(crate) fn flat(id: &str, s: f64) -> HazardReport {
        candidate(
            id,
            Some(DuplicateScoreSet {
                overall: s,
                rule_based: s,
                geo: s,
                lexical: s,
                semantic: s,
            }),
        )
    }

    fn ids<'a>(ranked: &[RankedCandidate<'a>]) -> Vec<&'a str> {
        ranked.iter().map(|c| c.report.id.as_str()).collect()
    }

    #[test]
    fn equal_top_scores_keep_source_order() {
        let candidates = vec![
            flat("HR-A", 0.70),
            flat("HR-B", 0.92),
            flat("HR-C", 0.92),
            flat("HR-D", 0.40),
        ];
        let ranked = rank_candidates(&candidates, SimilarityDimension::Semantic);
        assert_eq!(ids(&ranked), vec!["HR-B", "HR-C", "HR-A", "HR-D"]);

        // Reversing the tied pair in the input reverses it in the output.
        let candidates = vec![
            flat("HR-A", 0.70),
            flat("HR-C", 0.92),
            flat("HR-B", 0.92),
            flat("HR-D", 0.40),
        ];
        let ranked = rank_candidates(&candidates, SimilarityDimension::Semantic);
        assert_eq!(ids(&ranked), vec!["HR-C", "HR-B", "HR-A", "HR-D"]);
    }

    #[test]
    fn unscored_sort_last_in_source_order() {
        let candidates = vec![
            candidate("HR-X", None),
            flat("HR-A", 0.10),
            candidate("HR-Y", None),
            flat("HR-B", 0.00),
        ];
        let ranked = rank_candidates(&candidates, SimilarityDimension::Overall);
        assert_eq!(ids(&ranked), vec!["HR-A", "HR-B", "HR-X", "HR-Y"]);
        assert_eq!(ranked[1].score, Some(0.0));
        assert_eq!(ranked[2].score, None);
        assert_eq!(ranked[2].percent(), 0);
        assert_eq!(ranked[2].tier(), None);
        assert_eq!(ranked[1].tier(), Some(ScoreTier::Low));
    }

    #[test]
    fn nan_counts_as_unscored() {
        let candidates = vec![flat("HR-NAN", f64::NAN), flat("HR-A", 0.3)];
        let ranked = rank_candidates(&candidates, SimilarityDimension::Geo);
        assert_eq!(ids(&ranked), vec!["HR-A", "HR-NAN"]);
    }

    #[test]
    fn empty_and_single() {
        assert!(rank_candidates(&[], SimilarityDimension::Semantic).is_empty());
        let one = vec![flat("HR-A", 0.5)];
        assert_eq!(ids(&rank_candidates(&one, SimilarityDimension::Semantic)), vec!["HR-A"]);
    }

    #[test]
    fn ranking_reads_only_the_active_dimension() {
        let candidates = vec![
            candidate(
                "HR-A",
                Some(DuplicateScoreSet {
                    overall: 0.9,
                    rule_based: 0.1,
                    geo: 0.2,
                    lexical: 0.3,
                    semantic: 0.4,
                }),
            ),
            candidate(
                "HR-B",
                Some(DuplicateScoreSet {
                    overall: 0.1,
                    rule_based: 0.9,
                    geo: 0.8,
                    lexical: 0.7,
                    semantic: 0.6,
                }),
            ),
        ];
        let first = |d| rank_candidates(&candidates, d)[0].report.id.clone();
        assert_eq!(first(SimilarityDimension::Overall), "HR-A");
        assert_eq!(first(SimilarityDimension::RuleBased), "HR-B");
        assert_eq!(first(SimilarityDimension::Geo), "HR-B");
        assert_eq!(first(SimilarityDimension::Lexical), "HR-B");
        assert_eq!(first(SimilarityDimension::Semantic), "HR-B");
    }

    #[test]
    fn randomized_scores_rank_descending_and_stable() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for round in 0..200 {
            let n = rng.gen_range(0..12usize);
            let candidates: Vec<HazardReport> = (0..n)
                .map(|i| {
                    let id = format!("HR-{round}-{i}");
                    if rng.gen_bool(0.15) {
                        candidate(&id, None)
                    } else {
                        // Coarse grid so ties are common.
                        flat(&id, f64::from(rng.gen_range(0..=10u32)) / 10.0)
                    }
                })
                .collect();

            for dim in SimilarityDimension::ALL {
                let ranked = rank_candidates(&candidates, dim);
                assert_eq!(ranked.len(), candidates.len());

                let source_pos = |id: &str| candidates.iter().position(|c| c.id == id).unwrap();
                for pair in ranked.windows(2) {
                    match (pair[0].score, pair[1].score) {
                        (Some(a), Some(b)) => {
                            assert!(a >= b, "{a} ranked above {b}");
                            if a == b {
                                assert!(source_pos(&pair[0].report.id) < source_pos(&pair[1].report.id));
                            }
                        }
                        (None, Some(b)) => panic!("unset ranked above {b}"),
                        (Some(_), None) => {}
                        (None, None) => {
                            assert!(source_pos(&pair[0].report.id) < source_pos(&pair[1].report.id));
                        }
                    }
                }

                // Deterministic for the same inputs.
                assert_eq!(ids(&ranked), ids(&rank_candidates(&candidates, dim)));
            }
        }
    }
}
