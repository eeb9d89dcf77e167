mod display;

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use hazardlens_core::{HazardLabel, SimilarityDimension};
use hazardlens_review::{ReviewEvent, ReviewSession};
use hazardlens_store::{
    DEFAULT_PAGE_SIZE, ReportQuery, ReportSource, ReportStore, SortOrder, batch, hazard_types,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hazardlens")]
#[command(about = "Review duplicate clusters of hazard reports", version)]
struct Cli {
    /// Dataset snapshot to load.
    #[arg(long, env = "HAZARDLENS_DATA", default_value = "data/reports.json")]
    data: PathBuf,

    /// Rows per page in the report list.
    #[arg(long, env = "HAZARDLENS_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Reference date for report ages (defaults to the local date).
    #[arg(long)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarise every cluster.
    Clusters,

    /// List reports with search, filters and paging.
    Reports {
        #[arg(long, default_value = "")]
        search: String,
        /// TBC, PSPP or GR.
        #[arg(long)]
        label: Option<HazardLabel>,
        #[arg(long)]
        hazard: Option<String>,
        /// `asc` (oldest first) or `desc` (newest first).
        #[arg(long, default_value = "desc")]
        order: SortOrder,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show one report in full.
    Report { id: String },

    /// Review a cluster: ranked list, or comparison with one candidate.
    Review {
        cluster: String,
        /// overall, rule-based, geo, lexical or semantic.
        #[arg(long)]
        sort: Option<SimilarityDimension>,
        /// Candidate to compare with the representative.
        #[arg(long)]
        compare: Option<String>,
        /// Decision on the compared candidate.
        #[arg(long, value_enum, requires = "compare")]
        decision: Option<Decision>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Decision {
    Confirm,
    Reject,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("hazardlens=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(data = %cli.data.display(), page_size = cli.page_size, "configuration");

    let store = ReportStore::open(&cli.data)
        .with_context(|| format!("loading dataset {}", cli.data.display()))?;
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match cli.command {
        Command::Clusters => cmd_clusters(&store),
        Command::Reports {
            search,
            label,
            hazard,
            order,
            page,
        } => {
            if let Some(h) = &hazard {
                let known = hazard_types(store.reports());
                if !known.contains(&h.as_str()) {
                    warn!(hazard = %h, known = ?known, "no report has this hazard type");
                }
            }
            let query = ReportQuery::new(cli.page_size)
                .search(search)
                .label(label)
                .hazard_type(hazard)
                .order(order)
                .page(page);
            cmd_reports(&store, &query, today)
        }
        Command::Report { id } => cmd_report(&store, &id, today),
        Command::Review {
            cluster,
            sort,
            compare,
            decision,
        } => cmd_review(&store, &cluster, sort, compare.as_deref(), decision),
    }
}

fn cmd_clusters(store: &ReportStore) -> anyhow::Result<()> {
    let batch = batch::cluster_summary_batch(store.clusters())?;
    let mut out = String::new();
    display::write_table(&mut out, &batch)?;
    print!("{out}");
    Ok(())
}

fn cmd_reports(store: &ReportStore, query: &ReportQuery, today: NaiveDate) -> anyhow::Result<()> {
    let page = query.run(store.reports());
    info!(
        matches = page.total_matches,
        page = page.page,
        filtered = query.has_active_filters(),
        "report query"
    );

    let mut out = String::new();
    if !page.reports.is_empty() {
        let batch = batch::report_list_batch(&page.reports, today)?;
        display::write_table(&mut out, &batch)?;
    }
    display::write_page_footer(&mut out, &page)?;
    print!("{out}");
    Ok(())
}

fn cmd_report(store: &ReportStore, id: &str, today: NaiveDate) -> anyhow::Result<()> {
    let report = store.report(id)?;
    let out = display::render(|out| display::write_report_card(out, report, today))?;
    print!("{out}");
    Ok(())
}

fn cmd_review(
    store: &ReportStore,
    cluster_id: &str,
    sort: Option<SimilarityDimension>,
    compare: Option<&str>,
    decision: Option<Decision>,
) -> anyhow::Result<()> {
    let (screen, event) = review_cluster(store, cluster_id, sort, compare, decision)?;
    print!("{screen}");
    log_event(&event);
    Ok(())
}

/// Drive a review session the way a reviewer would: re-sort, pick a
/// candidate, decide. Returns the rendered screen and the emitted event.
fn review_cluster<S: ReportSource + ?Sized>(
    source: &S,
    cluster_id: &str,
    sort: Option<SimilarityDimension>,
    compare: Option<&str>,
    decision: Option<Decision>,
) -> anyhow::Result<(String, ReviewEvent)> {
    let mut session = ReviewSession::open(source, cluster_id)
        .with_context(|| format!("opening review for {cluster_id}"))?;
    if let Some(dimension) = sort {
        session.set_sort_dimension(dimension);
    }
    if let Some(candidate_id) = compare {
        session.select_candidate(candidate_id)?;
    }

    let screen = display::render(|out| display::write_review_screen(out, &session.screen()))?;
    let event = match decision {
        Some(Decision::Confirm) => session.confirm_duplicate()?,
        Some(Decision::Reject) => session.reject_duplicate()?,
        None => session.close(),
    };
    Ok((screen, event))
}

fn log_event(event: &ReviewEvent) {
    match event {
        ReviewEvent::Close => debug!("review closed"),
        ReviewEvent::ConfirmDuplicate {
            representative_id,
            candidate_id,
        } => info!(%representative_id, %candidate_id, "confirmed duplicate"),
        ReviewEvent::RejectDuplicate {
            representative_id,
            candidate_id,
        } => info!(%representative_id, %candidate_id, "rejected duplicate"),
    }
}
