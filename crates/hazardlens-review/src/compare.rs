//! Pairwise comparison of the representative with one candidate.

use hazardlens_core::{HazardReport, ScoreTier, SimilarityDimension, score_percent, score_to_tier};

/// One dimension of a candidate's score set, ready for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionScore {
    pub dimension: SimilarityDimension,
    pub score: Option<f64>,
}

impl DimensionScore {
    pub fn percent(&self) -> u32 {
        score_percent(self.score)
    }

    pub fn tier(&self) -> Option<ScoreTier> {
        self.score.map(score_to_tier)
    }
}

/// Side-by-side view of the representative (A) and a candidate (B).
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    pub representative: &'a HazardReport,
    pub candidate: &'a HazardReport,
    /// The candidate's scores, one entry per dimension in
    /// [`SimilarityDimension::ALL`] order.
    pub breakdown: Vec<DimensionScore>,
}

impl<'a> Comparison<'a> {
    pub fn new(representative: &'a HazardReport, candidate: &'a HazardReport) -> Self {
        let breakdown = SimilarityDimension::ALL
            .iter()
            .map(|&dimension| DimensionScore {
                dimension,
                score: candidate.score(dimension),
            })
            .collect();
        Self {
            representative,
            candidate,
            breakdown,
        }
    }

    pub fn score(&self, dimension: SimilarityDimension) -> DimensionScore {
        self.breakdown
            .iter()
            .copied()
            .find(|d| d.dimension == dimension)
            .unwrap_or(DimensionScore {
                dimension,
                score: None,
            })
    }

    /// Score of the representative itself along `dimension`, if the
    /// dataset carries one.
    pub fn representative_score(&self, dimension: SimilarityDimension) -> DimensionScore {
        DimensionScore {
            dimension,
            score: self.representative.score(dimension),
        }
    }
}
