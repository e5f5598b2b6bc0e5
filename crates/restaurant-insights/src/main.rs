//! CLI entry point for the restaurant insights dashboard.

use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use restaurant_insights::{
    AnalysisConfig, AnalysisResult, CostHistogram, DashboardReport, Pipeline,
    RatedRestaurant, RatingVotesPoint, ReportGenerator, SummaryKind, ValueCount,
};
use std::path::Path;
use tracing::{debug, info};

/// Width of the longest text bar.
const BAR_WIDTH: usize = 40;

/// Rows of the votes-vs-rating section printed in full.
const SCATTER_PREVIEW: usize = 5;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory dashboard for restaurant listing data",
    long_about = "Loads a restaurant listing CSV, cleans it and prints six summaries:\n\
                  top cities, top cuisines, highest rated, cost distribution,\n\
                  votes vs rating and rating categories.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  RUST_LOG              Log filter (overrides --log-level)\n\n\
                  EXAMPLES:\n  \
                  # Dashboard for a file\n  \
                  restaurant-insights -i zomato.csv\n\n  \
                  # Top 5 with a coarser histogram\n  \
                  restaurant-insights -i zomato.csv --top-n 5 --bins 10\n\n  \
                  # Machine-readable output\n  \
                  restaurant-insights -i zomato.csv --json"
)]
struct Args {
    /// Path to the CSV file to analyze (Latin-1)
    #[arg(short, long)]
    input: String,

    /// Output directory for written reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Number of entries in the ranked summaries
    #[arg(long, default_value = "10")]
    top_n: usize,

    /// Number of buckets in the cost distribution
    #[arg(long, default_value = "30")]
    bins: usize,

    /// Value written into missing cuisines before incomplete rows are dropped
    #[arg(long, default_value = "Unknown")]
    fill_value: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the dashboard)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of the text dashboard
    ///
    /// Disables all logs; only the final JSON report is written.
    #[arg(long)]
    json: bool,

    /// Write the JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_insights.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Load environment variables from .env file before RUST_LOG is read
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let config = AnalysisConfig::builder()
        .top_n(args.top_n)
        .histogram_bins(args.bins)
        .cuisine_fill_value(&args.fill_value)
        .output_dir(&args.output)
        .build()?;

    let pipeline = Pipeline::builder()
        .config(config)
        .on_progress(|update| {
            debug!(
                "[{:>3.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        })
        .build()?;

    let result = pipeline.run_path(&args.input)?;

    handle_output(&result, &args, &pipeline.config().output_dir)
}

/// Handle pipeline output based on CLI flags.
///
/// Output behavior:
/// - Default: Print the text dashboard to stdout
/// - `--json`: Print JSON to stdout only (no logs)
/// - `--emit-report`: Also write the JSON report to a file
fn handle_output(result: &AnalysisResult, args: &Args, output_dir: &Path) -> Result<()> {
    let report = ReportGenerator::build_report(&args.input, result);

    if args.emit_report {
        let generator = ReportGenerator::new(output_dir);
        let report_path = generator.write_report_to_file(&report, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_dashboard(&report);
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print the six dashboard sections.
///
/// Uses `println!` on purpose: this is the program's output, not logging.
fn print_dashboard(report: &DashboardReport) {
    let cleaning = &report.cleaning;
    let insights = &report.insights;

    println!();
    println!("{}", "=".repeat(80));
    println!("RESTAURANT INSIGHTS");
    println!("{}", "=".repeat(80));
    println!();
    println!("Input: {}", report.input_file);
    println!(
        "Rows:  {} -> {} ({} incomplete rows dropped, {:.1}%)",
        cleaning.rows_before,
        cleaning.rows_after,
        cleaning.rows_dropped(),
        cleaning.rows_dropped_percent()
    );
    if cleaning.cuisines_filled > 0 {
        println!("Missing cuisines filled: {}", cleaning.cuisines_filled);
    }
    println!("Duration: {}ms", report.duration_ms);

    for kind in SummaryKind::ALL {
        println!();
        println!("{}", kind.title());
        println!("{}", "-".repeat(kind.title().len()));

        if let Some(skipped) = insights.skipped.iter().find(|s| s.summary == kind) {
            println!("  ! skipped: {}", skipped.reason);
            continue;
        }

        match kind {
            SummaryKind::TopCities => print_counts(insights.top_cities.as_deref()),
            SummaryKind::TopCuisines => print_counts(insights.top_cuisines.as_deref()),
            SummaryKind::HighestRated => print_rated(insights.highest_rated.as_deref()),
            SummaryKind::CostDistribution => print_histogram(insights.cost_distribution.as_ref()),
            SummaryKind::VotesVsRating => print_scatter(insights.votes_vs_rating.as_deref()),
            SummaryKind::RatingCategories => print_counts(insights.rating_categories.as_deref()),
        }
    }

    println!();
    if !insights.is_complete() {
        println!(
            "{} of {} summaries skipped",
            insights.skipped.len(),
            SummaryKind::ALL.len()
        );
    }
    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save the JSON report");
    println!("{}", "=".repeat(80));
}

fn print_counts(counts: Option<&[ValueCount]>) {
    let counts = counts.unwrap_or_default();
    if counts.is_empty() {
        println!("  (no data)");
        return;
    }

    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    let label_width = counts
        .iter()
        .map(|c| c.value.chars().count())
        .max()
        .unwrap_or(0)
        .min(30);

    for entry in counts {
        println!(
            "  {:<width$}  {:>6}  {}",
            truncate_str(&entry.value, 30),
            entry.count,
            bar(entry.count, max),
            width = label_width
        );
    }
}

fn print_rated(rows: Option<&[RatedRestaurant]>) {
    let rows = rows.unwrap_or_default();
    if rows.is_empty() {
        println!("  (no data)");
        return;
    }

    for (i, row) in rows.iter().enumerate() {
        println!(
            "  {:>2}. {:<32} {:<20} {:.1}",
            i + 1,
            truncate_str(&row.restaurant_name, 32),
            truncate_str(&row.city, 20),
            row.aggregate_rating
        );
    }
}

fn print_histogram(histogram: Option<&CostHistogram>) {
    let Some(histogram) = histogram.filter(|h| !h.is_empty()) else {
        println!("  (no data)");
        return;
    };

    let max = histogram.buckets.iter().map(|b| b.count).max().unwrap_or(0);
    for bucket in &histogram.buckets {
        println!(
            "  {:>10.1} - {:<10.1} {:>6}  {}",
            bucket.lower,
            bucket.upper,
            bucket.count,
            bar(bucket.count, max)
        );
    }
}

fn print_scatter(points: Option<&[RatingVotesPoint]>) {
    let points = points.unwrap_or_default();
    if points.is_empty() {
        println!("  (no data)");
        return;
    }

    let mean_votes = points.iter().map(|p| p.votes).sum::<f64>() / points.len() as f64;
    let mean_rating =
        points.iter().map(|p| p.aggregate_rating).sum::<f64>() / points.len() as f64;
    println!(
        "  {} points, mean rating {:.2}, mean votes {:.1}",
        points.len(),
        mean_rating,
        mean_votes
    );

    let mut by_votes: Vec<&RatingVotesPoint> = points.iter().collect();
    by_votes.sort_by(|a, b| b.votes.total_cmp(&a.votes));
    println!("  Most voted:");
    for point in by_votes.into_iter().take(SCATTER_PREVIEW) {
        println!(
            "    {:<32} {:<20} rating {:.1}  votes {:.0}",
            truncate_str(&point.restaurant_name, 32),
            truncate_str(&point.city, 20),
            point.aggregate_rating,
            point.votes
        );
    }
}

/// Text bar scaled so `max` fills [`BAR_WIDTH`].
fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(max);
    "#".repeat(len)
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
