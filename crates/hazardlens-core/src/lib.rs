pub mod cluster;
pub mod report;
pub mod report_date;
pub mod schema;
pub mod tier;

pub use cluster::{ClusterComponents, ClusterInfo, ClusterReports, ClusterStatus};
pub use report::{
    AiStatus, Citation, DuplicateScoreSet, EvaluationStatus, HazardLabel, HazardReport,
    KnowledgeSource, MISSING_TEXT, SimilarityDimension, SlaStatus,
};
pub use report_date::{ReportAge, ReportDateError, parse_report_date, report_age, report_instant};
pub use schema::reports;
pub use tier::{ConfidenceBand, ScoreTier, score_percent, score_to_tier};
