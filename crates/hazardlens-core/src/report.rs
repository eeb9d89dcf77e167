//! Hazard report records as produced by the reporting pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder shown wherever an optional text field is absent.
pub const MISSING_TEXT: &str = "-";

/// Stage of the AI triage pipeline a report has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiStatus {
    AwaitingAnalysis,
    Analyzing,
    Failed,
    Done,
}

impl AiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingAnalysis => "awaiting analysis",
            Self::Analyzing => "analyzing",
            Self::Failed => "failed",
            Self::Done => "done",
        }
    }
}

/// Reviewer evaluation progress, populated once AI processing is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    NotEvaluated,
    InEvaluation,
    Done,
    NeedsReReview,
}

impl EvaluationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotEvaluated => "not evaluated",
            Self::InEvaluation => "in evaluation",
            Self::Done => "done",
            Self::NeedsReReview => "needs re-review",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    Green,
    Yellow,
    Red,
}

impl SlaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

/// Hazard category tag assigned by the AI pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardLabel {
    #[serde(rename = "TBC")]
    Tbc,
    #[serde(rename = "PSPP")]
    Pspp,
    #[serde(rename = "GR")]
    Gr,
}

impl HazardLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tbc => "TBC",
            Self::Pspp => "PSPP",
            Self::Gr => "GR",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Self::Tbc => "TBC - To be Concern Hazard",
            Self::Pspp => "PSPP - Peraturan Sanksi Pelanggaran Prosedur",
            Self::Gr => "GR - Safety Golden Rules",
        }
    }
}

impl fmt::Display for HazardLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HazardLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TBC" => Ok(Self::Tbc),
            "PSPP" => Ok(Self::Pspp),
            "GR" => Ok(Self::Gr),
            other => Err(format!("unknown hazard label: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub content: String,
}

/// Rulebook reference backing one of the AI-assigned labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSource {
    #[serde(rename = "type")]
    pub label_type: HazardLabel,
    pub label: String,
    pub category: String,
    pub category_number: u32,
    pub confidence: u8,
    pub reasoning: String,
    pub citation: Citation,
}

/// One axis along which a report is compared with its cluster representative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityDimension {
    Overall,
    RuleBased,
    Geo,
    Lexical,
    #[default]
    Semantic,
}

impl SimilarityDimension {
    pub const ALL: [SimilarityDimension; 5] = [
        Self::Overall,
        Self::RuleBased,
        Self::Geo,
        Self::Lexical,
        Self::Semantic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overall => "overall",
            Self::RuleBased => "rule-based",
            Self::Geo => "geo",
            Self::Lexical => "lexical",
            Self::Semantic => "semantic",
        }
    }
}

impl fmt::Display for SimilarityDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overall" => Ok(Self::Overall),
            "rule-based" | "rule_based" | "rulebased" | "rule" => Ok(Self::RuleBased),
            "geo" | "geographic" => Ok(Self::Geo),
            "lexical" => Ok(Self::Lexical),
            "semantic" => Ok(Self::Semantic),
            other => Err(format!("unknown similarity dimension: {other}")),
        }
    }
}

/// Similarity of a report to its cluster representative, one value in [0, 1]
/// per dimension.
///
/// `overall` is an aggregate supplied by the scorer; it is never derived from
/// the other four.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuplicateScoreSet {
    pub overall: f64,
    pub rule_based: f64,
    pub geo: f64,
    pub lexical: f64,
    pub semantic: f64,
}

impl DuplicateScoreSet {
    pub fn get(&self, dimension: SimilarityDimension) -> f64 {
        match dimension {
            SimilarityDimension::Overall => self.overall,
            SimilarityDimension::RuleBased => self.rule_based,
            SimilarityDimension::Geo => self.geo,
            SimilarityDimension::Lexical => self.lexical,
            SimilarityDimension::Semantic => self.semantic,
        }
    }
}

/// A submitted safety observation.
///
/// Fields after `ai_status` are only populated once the AI pipeline has
/// finished with the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardReport {
    pub id: String,
    /// Submission date as displayed, e.g. `03 Des 2025`.
    pub date: String,
    /// ISO 8601 timestamp string used for queue ordering.
    #[serde(default)]
    pub timestamp: Option<String>,
    pub reporter: String,
    pub reporter_role: String,
    pub site: String,
    pub location: String,
    #[serde(default)]
    pub location_code: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub location_detail: Option<String>,
    #[serde(default)]
    pub hazard_type: String,
    #[serde(default)]
    pub hazard_subtype: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quick_action: String,
    #[serde(default)]
    pub non_compliance: Option<String>,
    #[serde(default)]
    pub sub_non_compliance: Option<String>,
    #[serde(default)]
    pub cluster: Option<String>,
    pub ai_status: AiStatus,
    #[serde(default)]
    pub ai_batch: Option<String>,

    #[serde(default)]
    pub labels: Vec<HazardLabel>,
    #[serde(default)]
    pub confidence_score: Option<u8>,
    #[serde(default)]
    pub knowledge_sources: Vec<KnowledgeSource>,
    #[serde(default)]
    pub cluster_suggestion: Option<String>,
    #[serde(default)]
    pub evaluation_status: Option<EvaluationStatus>,
    #[serde(default)]
    pub evaluator_name: Option<String>,
    #[serde(default)]
    pub sla_status: Option<SlaStatus>,
    #[serde(default)]
    pub sla_due_date: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub duplicate_scores: Option<DuplicateScoreSet>,
}

impl HazardReport {
    /// Score along `dimension`, or `None` when the report is unscored.
    ///
    /// Non-finite values count as unscored.
    pub fn score(&self, dimension: SimilarityDimension) -> Option<f64> {
        self.duplicate_scores
            .map(|s| s.get(dimension))
            .filter(|v| v.is_finite())
    }

    pub fn has_label(&self, label: HazardLabel) -> bool {
        self.labels.contains(&label)
    }

    /// Area name, falling back to the location name.
    pub fn area_label(&self) -> &str {
        non_empty(self.area.as_deref()).unwrap_or(&self.location)
    }

    pub fn detail_label(&self) -> &str {
        non_empty(self.location_detail.as_deref()).unwrap_or(MISSING_TEXT)
    }

    pub fn description_text(&self) -> &str {
        non_empty(self.description.as_deref()).unwrap_or(MISSING_TEXT)
    }

    /// Non-compliance classification, falling back to the hazard type.
    pub fn non_compliance_label(&self) -> &str {
        non_empty(self.non_compliance.as_deref())
            .or_else(|| non_empty(Some(self.hazard_type.as_str())))
            .unwrap_or(MISSING_TEXT)
    }

    /// Sub-non-compliance classification, falling back to the hazard subtype.
    pub fn sub_non_compliance_label(&self) -> &str {
        non_empty(self.sub_non_compliance.as_deref())
            .or_else(|| non_empty(Some(self.hazard_subtype.as_str())))
            .unwrap_or(MISSING_TEXT)
    }

    pub fn cluster_origin(&self) -> String {
        match non_empty(self.cluster.as_deref()) {
            Some(id) => format!("Cluster {id}"),
            None => "no previous cluster".to_string(),
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
