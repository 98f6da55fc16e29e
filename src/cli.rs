// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::RunOptions;
use crate::config::consts::{DATA_ROOT_ENV, DEFAULT_DATA_ROOT};
use crate::error::Result;
use crate::progress::ConsoleProgress;

#[derive(Debug, Parser)]
#[command(name = "lead_scrape", version, about = "Per-customer directory scrapers feeding a staged CSV pipeline")]
pub struct Cli {
    /// Debug logging (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one stage
    Run(RunArgs),
    /// Print every known customer/base/entity
    List,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    pub customer: String,
    pub base: String,
    pub entity: String,

    /// Output directory [default: <data-root>/<customer>/<base>]
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Root of the <customer>/<base>/*.csv tree
    #[arg(long, env = DATA_ROOT_ENV, default_value = DEFAULT_DATA_ROOT)]
    pub data_root: PathBuf,

    /// Override the stage's start URL (base for relative links with --html-file)
    #[arg(long)]
    pub url: Option<String>,

    /// Parse a saved page instead of fetching it
    #[arg(long)]
    pub html_file: Option<PathBuf>,

    /// Province listing for muelles_com/amisando empresas
    #[arg(long)]
    pub provincia_url: Option<String>,

    /// Request timeout in seconds [env: SCRAPE_TIMEOUT]
    #[arg(long)]
    pub timeout: Option<String>,

    /// Stop after this many companies
    #[arg(long)]
    pub max_items: Option<usize>,
}

impl From<RunArgs> for RunOptions {
    fn from(a: RunArgs) -> Self {
        RunOptions {
            customer: a.customer,
            base: a.base,
            entity: a.entity,
            data_root: a.data_root,
            out_dir: a.out_dir,
            url: a.url,
            html_file: a.html_file,
            provincia_url: a.provincia_url,
            timeout: a.timeout,
            max_items: a.max_items,
        }
    }
}

pub fn run() -> Result<()> {
    // .env first so clap's `env = ...` defaults see it
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    crate::log::init(cli.verbose);
    if let Ok(path) = dotenv {
        logd!("loaded {}", path.display());
    }

    match cli.command {
        Command::List => {
            for (customer, base, entity, about) in crate::runner::list_stages() {
                println!("{customer} {base} {entity}\t{about}");
            }
            Ok(())
        }
        Command::Run(args) => {
            let opts = RunOptions::from(args);
            let mut progress = ConsoleProgress::new();
            let summary = crate::runner::run(&opts, &mut progress)?;
            if summary.skipped > 0 {
                println!(
                    "{} rows written, {} already present → {}",
                    summary.rows_written,
                    summary.skipped,
                    summary.output.display()
                );
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_options() {
        let cli = Cli::try_parse_from([
            "lead_scrape",
            "-v",
            "run",
            "datainnovation_com",
            "seraportiendasonline_com",
            "websites",
            "--data-root",
            "/tmp/data",
            "--timeout",
            "12.5",
            "--max-items",
            "10",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Command::Run(args) = cli.command else { panic!("expected run") };
        let opts = RunOptions::from(args);
        assert_eq!(opts.entity, "websites");
        assert_eq!(opts.data_root, PathBuf::from("/tmp/data"));
        assert_eq!(opts.timeout.as_deref(), Some("12.5"));
        assert_eq!(opts.max_items, Some(10));
        assert_eq!(opts.out_dir(), PathBuf::from("/tmp/data/datainnovation_com/seraportiendasonline_com"));
    }

    #[test]
    fn run_requires_three_positionals() {
        assert!(Cli::try_parse_from(["lead_scrape", "run", "muelles_com", "amisando"]).is_err());
    }

    #[test]
    fn list_subcommand() {
        let cli = Cli::try_parse_from(["lead_scrape", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List));
    }
}
