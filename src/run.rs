mod cli;
mod report;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

pub use cli::as_cli;

/// Parsed command line. Flags may appear before or after the command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub command: Option<String>,
    pub config: Option<PathBuf>,
    pub transactions: Option<PathBuf>,
    pub categories: Option<PathBuf>,
    pub date: Option<NaiveDate>,
    pub month: Option<String>,
    pub json: bool,
    pub verbose: bool,
}

impl Options {
    /// `args[0]` is the program name.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut opts = Self::default();
        let mut iter = args.iter().skip(1);

        while let Some(arg) = iter.next() {
            let arg = arg.as_str();
            let mut value = |flag: &str| -> Result<String> {
                iter.next()
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("Missing value for {flag}"))
            };
            match arg {
                "--config" => opts.config = Some(PathBuf::from(shellexpand(&value(arg)?))),
                "--transactions" | "-t" => {
                    opts.transactions = Some(PathBuf::from(shellexpand(&value(arg)?)))
                }
                "--categories" | "-c" => {
                    opts.categories = Some(PathBuf::from(shellexpand(&value(arg)?)))
                }
                "--date" => {
                    let raw = value(arg)?;
                    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                        .with_context(|| format!("Invalid --date '{raw}', expected YYYY-MM-DD"))?;
                    opts.date = Some(date);
                }
                "--month" => opts.month = Some(value(arg)?),
                "--json" => opts.json = true,
                "--verbose" | "-v" => opts.verbose = true,
                "--help" | "-h" => opts.command = Some("help".to_string()),
                "--version" | "-V" => opts.command = Some("version".to_string()),
                flag if flag.starts_with("--") => anyhow::bail!("Unknown option: {flag}"),
                command => {
                    if let Some(existing) = &opts.command {
                        anyhow::bail!("Unexpected argument '{command}' after '{existing}'");
                    }
                    opts.command = Some(command.to_string());
                }
            }
        }

        Ok(opts)
    }
}

pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
