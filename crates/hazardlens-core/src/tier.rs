//! Display tiers for similarity scores and AI confidence.
//!
//! Every view that shows a similarity score goes through [`score_to_tier`],
//! so one score always renders with the same emphasis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the high tier.
pub const HIGH_THRESHOLD: f64 = 0.75;
/// Lower bound (inclusive) of the medium tier.
pub const MEDIUM_THRESHOLD: f64 = 0.50;

/// Presentation bucket for a [0, 1] similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a score to its tier: `>= 0.75` high, `>= 0.50` medium, otherwise low.
///
/// NaN falls through to low.
pub fn score_to_tier(score: f64) -> ScoreTier {
    if score >= HIGH_THRESHOLD {
        ScoreTier::High
    } else if score >= MEDIUM_THRESHOLD {
        ScoreTier::Medium
    } else {
        ScoreTier::Low
    }
}

/// Whole-number percentage of a [0, 1] score, `0` when unset.
pub fn score_percent(score: Option<f64>) -> u32 {
    match score {
        Some(s) if s.is_finite() => (s.clamp(0.0, 1.0) * 100.0).round() as u32,
        _ => 0,
    }
}

/// Band for the AI pipeline's 0-100 confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: u8) -> Self {
        match confidence {
            90.. => Self::High,
            80..=89 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}
