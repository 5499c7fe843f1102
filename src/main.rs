use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use budgetlens::run;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let verbose = run::Options::parse(&args)
        .map(|opts| opts.verbose)
        .unwrap_or(false);
    init_logging(verbose);
    run::as_cli(&args)
}

/// RUST_LOG wins over --verbose; the default only shows warnings so that
/// reports stay clean on stdout.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
