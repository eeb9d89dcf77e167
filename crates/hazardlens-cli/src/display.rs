//! Terminal rendering for reports, cluster tables and review screens.
//!
//! Renderers write into any [`fmt::Write`], so `main` can print them and
//! tests can inspect them.

use std::fmt::{self, Write};

use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use chrono::NaiveDate;
use hazardlens_core::{
    ClusterInfo, ConfidenceBand, HazardReport, MISSING_TEXT, SimilarityDimension,
    parse_report_date, report_age, score_percent, score_to_tier,
};
use hazardlens_review::{Comparison, DimensionScore, RankedCandidate, ReviewScreen};
use hazardlens_store::ReportPage;

const MAX_LIST_ITEMS: usize = 10;
const MAX_TEXT: usize = 60;
const COMPARE_COL: usize = 40;
const ROW_DESCRIPTION: usize = 48;

/// Per-column score badges on the compare screen.
const BADGE_DIMENSIONS: [SimilarityDimension; 3] = [
    SimilarityDimension::Semantic,
    SimilarityDimension::Geo,
    SimilarityDimension::Lexical,
];

/// Render into a fresh `String`.
pub fn render<F>(f: F) -> Result<String, fmt::Error>
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut out = String::new();
    f(&mut out)?;
    Ok(out)
}

// ── Tables ──

pub fn write_table(out: &mut impl Write, batch: &RecordBatch) -> anyhow::Result<()> {
    let table = pretty_format_batches(std::slice::from_ref(batch))?;
    writeln!(out, "{table}")?;
    Ok(())
}

pub fn write_page_footer(out: &mut impl Write, page: &ReportPage<'_>) -> fmt::Result {
    if page.total_matches == 0 {
        return writeln!(out, "No reports match.");
    }
    writeln!(
        out,
        "Page {} of {} ({} reports)",
        page.page, page.total_pages, page.total_matches
    )
}

// ── Report card ──

pub fn write_report_card(
    out: &mut impl Write,
    report: &HazardReport,
    today: NaiveDate,
) -> fmt::Result {
    writeln!(out, "=== {} ===", report.id)?;
    if !report.hazard_type.is_empty() {
        writeln!(out, "{} / {}", report.hazard_type, report.hazard_subtype)?;
    }
    writeln!(out)?;

    writeln!(out, "Identity")?;
    field(out, "date", &report.date)?;
    field(out, "age", &age_text(report, today))?;
    field(
        out,
        "reporter",
        &format!("{} ({})", report.reporter, report.reporter_role),
    )?;
    field(out, "site", &report.site)?;
    writeln!(out)?;

    writeln!(out, "Location")?;
    field(out, "location", &report.location)?;
    field(out, "area", report.area_label())?;
    field(out, "detail", report.detail_label())?;
    if !report.location_code.is_empty() {
        field(out, "location code", &report.location_code)?;
    }
    if let (Some(lat), Some(lon)) = (report.latitude, report.longitude) {
        field(out, "coordinates", &format!("{lat:.5}, {lon:.5}"))?;
    }
    writeln!(out)?;

    writeln!(out, "Finding")?;
    field(out, "non-compliance", report.non_compliance_label())?;
    field(out, "sub non-compliance", report.sub_non_compliance_label())?;
    field(out, "description", &truncate(report.description_text(), MAX_TEXT))?;
    if !report.quick_action.is_empty() {
        field(out, "quick action", &report.quick_action)?;
    }
    writeln!(out)?;

    writeln!(out, "AI Analysis")?;
    field(out, "status", report.ai_status.as_str())?;
    if let Some(batch) = &report.ai_batch {
        field(out, "batch", batch)?;
    }
    for label in &report.labels {
        field(out, "label", label.full_name())?;
    }
    if let Some(confidence) = report.confidence_score {
        let band = ConfidenceBand::from_confidence(confidence);
        field(out, "confidence", &format!("{confidence}% ({})", band.as_str()))?;
    }
    field(out, "cluster", &report.cluster_origin())?;
    if let Some(suggestion) = &report.cluster_suggestion {
        field(out, "cluster suggestion", suggestion)?;
    }
    writeln!(out)?;

    write_knowledge_sources(out, report)?;

    if report.evaluation_status.is_some() || report.sla_status.is_some() {
        writeln!(out, "Evaluation")?;
        if let Some(status) = report.evaluation_status {
            field(out, "status", status.as_str())?;
        }
        if let Some(name) = &report.evaluator_name {
            field(out, "evaluator", name)?;
        }
        if let Some(sla) = report.sla_status {
            let due = report.sla_due_date.as_deref().unwrap_or(MISSING_TEXT);
            field(out, "sla", &format!("{} (due {due})", sla.as_str()))?;
        }
        if let Some(assignee) = &report.assigned_to {
            field(out, "assigned to", assignee)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_knowledge_sources(out: &mut impl Write, report: &HazardReport) -> fmt::Result {
    let sources = &report.knowledge_sources;
    if sources.is_empty() {
        return Ok(());
    }
    writeln!(out, "Knowledge Sources ({})", sources.len())?;
    for source in sources.iter().take(MAX_LIST_ITEMS) {
        writeln!(
            out,
            "    [{}] {}  (category {} {}, {}%)",
            source.label_type, source.label, source.category_number, source.category, source.confidence
        )?;
        writeln!(out, "      {}", truncate(&source.reasoning, MAX_TEXT))?;
        writeln!(out, "      cite: {}", source.citation.title)?;
    }
    if sources.len() > MAX_LIST_ITEMS {
        writeln!(out, "    ... and {} more", sources.len() - MAX_LIST_ITEMS)?;
    }
    writeln!(out)
}

// ── Review screens ──

pub fn write_review_screen(out: &mut impl Write, screen: &ReviewScreen<'_>) -> fmt::Result {
    match screen {
        ReviewScreen::Empty { cluster } => {
            write_cluster_header(out, cluster)?;
            writeln!(out, "This cluster has no reports.")
        }
        ReviewScreen::List {
            cluster,
            representative,
            sort,
            candidates,
        } => {
            write_cluster_header(out, cluster)?;
            writeln!(out, "Representative")?;
            field(out, "id", &representative.id)?;
            field(out, "reporter", &representative.reporter)?;
            field(out, "location", &representative.location)?;
            field(out, "date", &representative.date)?;
            writeln!(out)?;

            writeln!(out, "Candidates by {sort} ({})", candidates.len())?;
            if candidates.is_empty() {
                writeln!(out, "    (none)")?;
            }
            for c in candidates {
                write_candidate_row(out, c)?;
            }
            writeln!(out)
        }
        ReviewScreen::Compare { cluster, comparison } => {
            write_cluster_header(out, cluster)?;
            write_comparison(out, comparison)
        }
    }
}

fn write_cluster_header(out: &mut impl Write, cluster: &ClusterInfo) -> fmt::Result {
    writeln!(out, "=== {} {} ===", cluster.id, cluster.name)?;
    writeln!(
        out,
        "  {} reports, similarity {}% ({}), {}",
        cluster.report_count,
        score_percent(Some(cluster.similarity_score)),
        score_to_tier(cluster.similarity_score),
        cluster.status.as_str()
    )?;
    for (label, value) in cluster.components.entries() {
        writeln!(
            out,
            "    {:<24} {:>3}%  {}",
            label,
            score_percent(Some(value)),
            score_to_tier(value).as_str()
        )?;
    }
    writeln!(out)
}

fn write_candidate_row(out: &mut impl Write, c: &RankedCandidate<'_>) -> fmt::Result {
    let tier = c.tier().map_or(MISSING_TEXT, |t| t.as_str());
    let r = c.report;
    writeln!(
        out,
        "    {:<20} {:>3}%  {:<6}  {:<12}  {:<16}  {}",
        r.id,
        c.percent(),
        tier,
        r.date,
        r.reporter,
        truncate(&r.location, 36)
    )?;
    // Unscored dimensions show as 0%.
    let pct = |d| score_percent(r.score(d));
    writeln!(
        out,
        "        G {:>3}%  L {:>3}%  S {:>3}%  {}",
        pct(SimilarityDimension::Geo),
        pct(SimilarityDimension::Lexical),
        pct(SimilarityDimension::Semantic),
        truncate(r.description_text(), ROW_DESCRIPTION)
    )
}

fn write_comparison(out: &mut impl Write, cmp: &Comparison<'_>) -> fmt::Result {
    let (a, b) = (cmp.representative, cmp.candidate);
    writeln!(out, "Compare")?;
    pair(out, "", "A (representative)", "B (candidate)")?;
    pair(out, "id", &a.id, &b.id)?;
    pair(out, "date", &a.date, &b.date)?;
    pair(out, "reporter", &a.reporter, &b.reporter)?;
    pair(out, "site", &a.site, &b.site)?;
    pair(out, "location", &a.location, &b.location)?;
    pair(out, "area", a.area_label(), b.area_label())?;
    pair(out, "detail", a.detail_label(), b.detail_label())?;
    pair(out, "non-compliance", a.non_compliance_label(), b.non_compliance_label())?;
    pair(
        out,
        "sub non-compliance",
        a.sub_non_compliance_label(),
        b.sub_non_compliance_label(),
    )?;
    pair(out, "description", a.description_text(), b.description_text())?;
    for dimension in BADGE_DIMENSIONS {
        pair(
            out,
            dimension.as_str(),
            &badge(cmp.representative_score(dimension)),
            &badge(cmp.score(dimension)),
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Similarity of B to A")?;
    for d in &cmp.breakdown {
        let tier = d.tier().map_or(MISSING_TEXT, |t| t.as_str());
        writeln!(out, "  {:<26} {:>3}%  {}", d.dimension.as_str(), d.percent(), tier)?;
    }
    writeln!(out)
}

// ── Helpers ──

fn field(out: &mut impl Write, name: &str, value: &str) -> fmt::Result {
    writeln!(out, "  {:<26} {}", name, value)
}

fn pair(out: &mut impl Write, name: &str, a: &str, b: &str) -> fmt::Result {
    writeln!(
        out,
        "  {:<20} {:<width$} {}",
        name,
        truncate(a, COMPARE_COL - 2),
        truncate(b, COMPARE_COL - 2),
        width = COMPARE_COL
    )
}

fn badge(score: DimensionScore) -> String {
    let tier = score.tier().map_or(MISSING_TEXT, |t| t.as_str());
    format!("{}% {}", score.percent(), tier)
}

fn age_text(report: &HazardReport, today: NaiveDate) -> String {
    parse_report_date(&report.date)
        .map(|d| report_age(d, today).to_string())
        .unwrap_or_else(|_| MISSING_TEXT.to_string())
}

/// Shorten to at most `max` characters, marking the cut with `...`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
