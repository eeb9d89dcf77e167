//! Report list queries: search, label and hazard filters, time ordering,
//! pagination.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use hazardlens_core::{HazardLabel, HazardReport, report_instant};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "oldest" => Ok(Self::Asc),
            "desc" | "newest" => Ok(Self::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Filter and paging state of the report list.
///
/// Changing the search term or a filter returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    search: String,
    label: Option<HazardLabel>,
    hazard_type: Option<String>,
    order: SortOrder,
    page: usize,
    page_size: usize,
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One page of query results.
#[derive(Debug)]
pub struct ReportPage<'a> {
    pub reports: Vec<&'a HazardReport>,
    /// 1-based page number.
    pub page: usize,
    pub total_pages: usize,
    /// Matches across all pages.
    pub total_matches: usize,
}

impl ReportQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            label: None,
            hazard_type: None,
            order: SortOrder::Desc,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self.page = 1;
        self
    }

    pub fn label(mut self, label: Option<HazardLabel>) -> Self {
        self.label = label;
        self.page = 1;
        self
    }

    pub fn hazard_type(mut self, hazard_type: Option<String>) -> Self {
        self.hazard_type = hazard_type;
        self.page = 1;
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    /// True when label, hazard type or order differ from their defaults.
    ///
    /// The search term is not a filter.
    pub fn has_active_filters(&self) -> bool {
        self.label.is_some() || self.hazard_type.is_some() || self.order != SortOrder::Desc
    }

    /// Reset label, hazard type and order; keep the search term.
    pub fn clear_filters(mut self) -> Self {
        self.label = None;
        self.hazard_type = None;
        self.order = SortOrder::Desc;
        self.page = 1;
        self
    }

    pub fn matches(&self, report: &HazardReport) -> bool {
        self.matches_search(report)
            && self.label.is_none_or(|l| report.has_label(l))
            && self
                .hazard_type
                .as_deref()
                .is_none_or(|h| report.hazard_type == h)
    }

    fn matches_search(&self, report: &HazardReport) -> bool {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [
            Some(report.id.as_str()),
            Some(report.reporter.as_str()),
            Some(report.location.as_str()),
            report.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
    }

    /// All matches, ordered by queue time. Reports without a usable time
    /// come last in list order.
    pub fn filter_sorted<'a>(&self, reports: &'a [HazardReport]) -> Vec<&'a HazardReport> {
        let mut keyed: Vec<(Option<DateTime<Utc>>, &HazardReport)> = reports
            .iter()
            .filter(|r| self.matches(r))
            .map(|r| (report_instant(r.timestamp.as_deref(), &r.date), r))
            .collect();
        let order = self.order;
        keyed.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => match order {
                SortOrder::Asc => a.cmp(b),
                SortOrder::Desc => b.cmp(a),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        keyed.into_iter().map(|(_, r)| r).collect()
    }

    /// Run the query and slice out the current page.
    pub fn run<'a>(&self, reports: &'a [HazardReport]) -> ReportPage<'a> {
        let all = self.filter_sorted(reports);
        let total_matches = all.len();
        let total_pages = total_matches.div_ceil(self.page_size);
        let start = (self.page - 1).saturating_mul(self.page_size);
        let page_reports = all
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect();
        ReportPage {
            reports: page_reports,
            page: self.page,
            total_pages,
            total_matches,
        }
    }
}

/// Distinct non-empty hazard types in first-seen order.
pub fn hazard_types(reports: &[HazardReport]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for r in reports {
        let h = r.hazard_type.as_str();
        if !h.is_empty() && !seen.contains(&h) {
            seen.push(h);
        }
    }
    seen
}
