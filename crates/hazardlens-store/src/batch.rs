//! Arrow RecordBatch builders for report and cluster tables.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, Float64Array, ListBuilder, StringArray, StringBuilder, UInt8Array, UInt32Array,
};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use hazardlens_core::{ClusterInfo, HazardReport, parse_report_date, report_age, reports, score_to_tier};

use crate::StoreError;

/// Build a report list batch. `today` drives the `age` column; unparseable
/// dates leave it null.
pub fn report_list_batch(
    rows: &[&HazardReport],
    today: NaiveDate,
) -> Result<RecordBatch, StoreError> {
    let schema = Arc::new(reports::report_list_schema());

    let ids: StringArray = rows.iter().map(|r| Some(r.id.as_str())).collect();
    let dates: StringArray = rows.iter().map(|r| Some(r.date.as_str())).collect();
    let ages: StringArray = rows
        .iter()
        .map(|r| {
            parse_report_date(&r.date)
                .ok()
                .map(|d| report_age(d, today).to_string())
        })
        .collect();
    let reporters: StringArray = rows.iter().map(|r| Some(r.reporter.as_str())).collect();
    let sites: StringArray = rows.iter().map(|r| Some(r.site.as_str())).collect();
    let hazards: StringArray = rows
        .iter()
        .map(|r| Some(r.hazard_type.as_str()).filter(|h| !h.is_empty()))
        .collect();

    let mut labels = ListBuilder::new(StringBuilder::new());
    for r in rows {
        for label in &r.labels {
            labels.values().append_value(label.as_str());
        }
        labels.append(true);
    }

    let confidence: UInt8Array = rows.iter().map(|r| r.confidence_score).collect();
    let clusters: StringArray = rows.iter().map(|r| r.cluster.as_deref()).collect();
    let ai_status: StringArray = rows.iter().map(|r| Some(r.ai_status.as_str())).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(ids),
        Arc::new(dates),
        Arc::new(ages),
        Arc::new(reporters),
        Arc::new(sites),
        Arc::new(hazards),
        Arc::new(labels.finish()),
        Arc::new(confidence),
        Arc::new(clusters),
        Arc::new(ai_status),
    ];
    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Build a cluster summary batch, one row per cluster.
pub fn cluster_summary_batch(clusters: &[ClusterInfo]) -> Result<RecordBatch, StoreError> {
    let schema = Arc::new(reports::cluster_summary_schema());

    let ids: StringArray = clusters.iter().map(|c| Some(c.id.as_str())).collect();
    let names: StringArray = clusters.iter().map(|c| Some(c.name.as_str())).collect();
    let counts: UInt32Array = clusters.iter().map(|c| Some(c.report_count)).collect();
    let scores: Float64Array = clusters.iter().map(|c| Some(c.similarity_score)).collect();
    let tiers: StringArray = clusters
        .iter()
        .map(|c| Some(score_to_tier(c.similarity_score).as_str()))
        .collect();
    let statuses: StringArray = clusters.iter().map(|c| Some(c.status.as_str())).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(ids),
        Arc::new(names),
        Arc::new(counts),
        Arc::new(scores),
        Arc::new(tiers),
        Arc::new(statuses),
    ];
    Ok(RecordBatch::try_new(schema, columns)?)
}
