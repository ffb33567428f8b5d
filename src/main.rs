// file: src/main.rs
// description: commandline application entry point

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use devsync::utils::logging::{format_error, format_success, format_warning, init_logger};
use devsync::{Config, Mirror, Shortcuts, SyncOrchestrator, Target};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "devsync")]
#[command(version)]
#[command(about = "Backs up data and repositories to external destinations", long_about = None)]
struct Cli {
    /// Destination path, or a shortcut name from the shortcuts file
    #[arg(value_name = "DESTINATION")]
    destination: String,

    #[arg(short, long, value_name = "FILE", default_value = "config/default.yml")]
    config: PathBuf,

    #[arg(long, value_name = "FILE", default_value = "config/shortcuts.yml")]
    shortcuts: PathBuf,

    /// Only update repositories with commits after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_cutoff, default_value = "1970-01-01")]
    last_update: i64,

    /// Report intended actions without changing anything
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn parse_cutoff(value: &str) -> std::result::Result<i64, String> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date {value}: {e}"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("invalid date {value}"))?;
    Ok(midnight.and_utc().timestamp())
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.color, cli.verbose);

    match run(cli) {
        Ok(()) => println!("{}", format_success("Finished backup")),
        Err(err) => {
            eprintln!("{}", format_error(&format!("Backup failed: {err:#}")));
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    info!("devsync {}", env!("CARGO_PKG_VERSION"));
    info!("Loading configuration from: {}", cli.config.display());
    let config = Config::load(&cli.config).context("Failed to load configuration")?;

    let shortcuts =
        Shortcuts::load(&cli.shortcuts).context("Failed to load destination shortcuts")?;
    let destination = shortcuts.resolve(&cli.destination);
    let target = Target::new(&destination).context("Failed to resolve backup target")?;

    if cli.dry_run {
        println!("{}", format_warning("Dry run: nothing will be changed"));
    }

    let home = config
        .home
        .canonicalize()
        .with_context(|| format!("Source root {} does not exist", config.home.display()))?;
    let mut folders = config.folders_under(&home);

    info!("Starting backup for {}", target.path().display());
    info!("Updating repositories...");
    let orchestrator = SyncOrchestrator::new(&home);
    let summary = orchestrator
        .run(&mut folders, &target, cli.last_update, cli.dry_run)
        .context("Repository update failed")?;
    info!(
        "Repositories: {} discovered, {} stale, {} pulled, {} cloned",
        summary.discovered, summary.stale, summary.pulled, summary.cloned
    );

    if summary.skip_mirror {
        info!("Destination coincides with the source tree; skipping file mirror");
    } else {
        info!("Mirroring files with rsync...");
        Mirror::new(&home, &target)
            .sync(&folders, cli.dry_run)
            .context("File mirror failed")?;
    }

    Ok(())
}
