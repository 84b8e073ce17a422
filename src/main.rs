use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use colored::*;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use commitpie::chart::{ChartDataAdapter, DuplicatePolicy};
use commitpie::config::{AuthorIdentity, Config};
use commitpie::output::{ChartReport, OutputFormat, Reporter};
use commitpie::source::{load_payload, ChartInput, GitCommitSource};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["payload", "repo"])))]
struct Cli {
    /// JSON payload with repository and commitsByAuthor (`-` reads stdin)
    #[arg(short, long)]
    payload: Option<PathBuf>,

    /// Local git repository to count commits in
    #[arg(short, long)]
    repo: Option<PathBuf>,

    /// Output format (html, json)
    #[arg(short, long)]
    output: Option<String>,

    /// Output file (report.html|json)
    #[arg(long)]
    output_file: Option<String>,

    /// Configuration file (toml, json, yaml)
    #[arg(short, long, env = "COMMITPIE_CONFIG")]
    config: Option<PathBuf>,

    /// How to combine repeated authors (overwrite, accumulate)
    #[arg(short, long)]
    duplicates: Option<DuplicatePolicy>,

    /// How git authors are identified (name, name-email)
    #[arg(short, long)]
    identity: Option<AuthorIdentity>,

    /// Maximum number of commits to walk in a git repository
    #[arg(long)]
    max_commits: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    println!("{}", "CommitPie - Commits by Author".bright_cyan().bold());

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(policy) = cli.duplicates {
        config.chart.duplicate_policy = policy;
    }
    if let Some(identity) = cli.identity {
        config.source.identity = identity;
    }
    if cli.max_commits.is_some() {
        config.source.max_commits = cli.max_commits;
    }

    let input: ChartInput = match (&cli.payload, &cli.repo) {
        (Some(payload), _) => {
            println!("Payload: {}", payload.display().to_string().bright_white());
            load_payload(payload)?
        }
        (None, repo) => {
            let repo = repo
                .as_deref()
                .context("Either --payload or --repo must be given")?;
            println!("Repository: {}", repo.display().to_string().bright_white());
            GitCommitSource::new(repo, config.source.max_commits, config.source.identity)
                .collect()
                .await?
        }
    };

    let adapter = ChartDataAdapter::new(config.chart.duplicate_policy);
    info!("Building chart ({:?} duplicates)", adapter.policy());
    let build = adapter.build(input.repository.as_ref(), input.commits_by_author.as_ref());
    let report = ChartReport::new(input.repository, build);

    let format = cli
        .output
        .unwrap_or_else(|| config.output.default_format.clone());
    let output_file = cli
        .output_file
        .unwrap_or_else(|| config.output.output_file.clone());
    let mut reporter = Reporter::new(&format, &output_file)?;
    reporter.generate_report(&report).await?;

    print_summary(&report, &reporter);

    Ok(())
}

fn print_summary(report: &ChartReport, reporter: &Reporter) {
    match &report.chart {
        Some(chart) => {
            println!(
                "\n{} {} authors, {} commits",
                "Chart:".bright_white().bold(),
                chart.len().to_string().bright_green(),
                chart.total().to_string().bright_green()
            );
            if !report.duplicates.is_empty() {
                println!(
                    "{} {} repeated authors merged",
                    "Note:".yellow().bold(),
                    report.duplicates.len()
                );
            }
            if !report.rejected.is_empty() {
                println!(
                    "{} {} malformed entries skipped",
                    "Warning:".yellow().bold(),
                    report.rejected.len()
                );
            }
        }
        None => println!(
            "\n{}",
            "No repository or commit statistics, nothing to chart".yellow()
        ),
    }

    let kind = match reporter.format() {
        OutputFormat::Html => "HTML",
        OutputFormat::Json => "JSON",
    };
    println!(
        "{} report written to {}",
        kind,
        reporter.output_path().bright_white()
    );
    println!("\n{}", "Done!".bright_green().bold());
}
