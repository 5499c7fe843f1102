use anyhow::{Context, Result};
use serde::Serialize;

use super::report;
use super::Options;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::source::FileSource;

pub fn as_cli(args: &[String]) -> Result<()> {
    let opts = Options::parse(args)?;

    match opts.command.as_deref().unwrap_or("summary") {
        "summary" | "s" => cli_summary(&opts),
        "analysis" | "a" => cli_analysis(&opts),
        "overview" | "o" => cli_overview(&opts),
        "categories" => cli_categories(&opts),
        "help" => {
            print_usage();
            Ok(())
        }
        "version" => {
            println!("budgetlens {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("budgetlens - budget summaries and spending analysis");
    println!();
    println!("Usage: budgetlens [options] [command]");
    println!();
    println!("Commands:");
    println!("  summary (default)             Budget rows and metrics for the current month");
    println!("  analysis                      Spending analysis, insights and recommendations");
    println!("    --month <Jan..Dec|All>      Filter the monthly trend to one calendar month");
    println!("  overview                      Total income, expenses and balance");
    println!("  categories                    List categories and their budget limits");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --transactions, -t <path>     Transactions file (.json or .csv)");
    println!("  --categories, -c <path>       Categories file (.json or .csv)");
    println!("  --config <path>               Config file (default: platform config dir)");
    println!("  --date <YYYY-MM-DD>           Treat this date as today");
    println!("  --json                        Print JSON instead of text");
    println!("  --verbose, -v                 Debug logging (RUST_LOG overrides)");
}

fn load_dashboard(opts: &Options) -> Result<Dashboard> {
    let config = Config::load(opts.config.as_deref())?;
    let transactions = match &opts.transactions {
        Some(path) => path.clone(),
        None => config.transactions_path()?,
    };
    let categories = match &opts.categories {
        Some(path) => path.clone(),
        None => config.categories_path()?,
    };
    let today = opts
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::debug!(%today, "reference date");

    let source = FileSource::new(transactions, categories);
    Dashboard::load(&source, today, config.analysis)
}

fn emit<T: Serialize>(opts: &Options, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if opts.json {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{json}");
    } else {
        print!("{}", text());
    }
    Ok(())
}

fn cli_summary(opts: &Options) -> Result<()> {
    let dash = load_dashboard(opts)?;
    let summary = dash.summary();
    emit(opts, summary, || report::render_summary(summary))
}

#[derive(Serialize)]
struct AnalysisOutput<'a> {
    #[serde(flatten)]
    analysis: &'a crate::analysis::SpendingAnalysis,
    insights: Vec<String>,
    recommendations: Vec<String>,
}

fn cli_analysis(opts: &Options) -> Result<()> {
    let dash = load_dashboard(opts)?;
    let analysis = dash.analysis();
    let output = AnalysisOutput {
        analysis,
        insights: crate::analysis::text::insight_lines(analysis),
        recommendations: crate::analysis::text::recommendations(analysis),
    };
    emit(opts, &output, || {
        report::render_analysis(analysis, opts.month.as_deref(), dash.reference_date())
    })
}

fn cli_overview(opts: &Options) -> Result<()> {
    let dash = load_dashboard(opts)?;
    let overview = dash.overview();
    emit(opts, overview, || {
        report::render_overview(overview, dash.transactions().len())
    })
}

fn cli_categories(opts: &Options) -> Result<()> {
    let dash = load_dashboard(opts)?;
    emit(opts, &dash.categories(), || report::render_categories(dash.categories()))
}
