use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use resume_ranker::config::{LoggingSettings, Settings};
use resume_ranker::models::{ErrorResponse, RankRequest, ResumeUpload};
use resume_ranker::services::RankingService;

/// Rank resumes against a job description and print the result as JSON
#[derive(Parser, Debug)]
#[command(name = "resume-ranker", version, about)]
struct Cli {
    /// Configuration file (defaults to config/default.toml and config/local.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Job description text
    #[arg(long, conflicts_with = "job_file", required_unless_present = "job_file")]
    job: Option<String>,

    /// File containing the job description
    #[arg(long)]
    job_file: Option<PathBuf>,

    /// Keep only the top N results
    #[arg(long)]
    limit: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Resume files to rank
    #[arg(required = true)]
    resumes: Vec<PathBuf>,
}

fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // No subscriber exists until the settings are known
    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_with(&e);
        }
    };

    init_logging(&settings.logging);

    if let Err(e) = run(&cli, &settings) {
        error!("{:#}", e);
        exit_with(&e);
    }
}

/// Print the JSON error body on stdout and exit non-zero
fn exit_with(e: &anyhow::Error) -> ! {
    match serde_json::to_string(&error_response(e)) {
        Ok(json) => println!("{json}"),
        Err(_) => eprintln!("{:#}", e),
    }
    std::process::exit(1);
}

fn error_response(e: &anyhow::Error) -> ErrorResponse {
    ErrorResponse {
        error: "ranking_failed".to_string(),
        message: format!("{:#}", e),
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("Failed to load configuration")?;

    if cli.limit.is_some() {
        settings.ranking.max_results = cli.limit;
    }

    Ok(settings)
}

fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    info!("Starting resume ranker v{}", env!("CARGO_PKG_VERSION"));

    let job_description = match (&cli.job, &cli.job_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read job description '{}'", path.display()))?,
        (None, None) => anyhow::bail!("Either --job or --job-file is required"),
    };

    let resumes = cli
        .resumes
        .iter()
        .map(|path| {
            let content = std::fs::read(path)
                .with_context(|| format!("Cannot read resume '{}'", path.display()))?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(ResumeUpload::new(filename, content))
        })
        .collect::<Result<Vec<_>>>()?;

    let service = RankingService::from_settings(settings);
    let response = service.rank_request(&RankRequest {
        job_description,
        resumes,
    })?;

    info!(
        "Ranked {} of {} resumes",
        response.ranked_documents, response.total_documents
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");

    Ok(())
}

/// Structured logging to stderr; RUST_LOG overrides the configured level
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("resume_ranker={}", logging.level)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_fails_before_logging() {
        let cli = Cli::parse_from([
            "resume-ranker",
            "--config",
            "/nonexistent/ranker.toml",
            "--job",
            "Rust engineer",
            "cv.txt",
        ]);
        let err = load_settings(&cli).unwrap_err();
        assert!(format!("{:#}", err).starts_with("Failed to load configuration"));
    }

    #[test]
    fn test_error_response_carries_context_chain() {
        let err = anyhow::anyhow!("disk full").context("Cannot read resume 'cv.pdf'");
        let body = error_response(&err);
        assert_eq!(body.error, "ranking_failed");
        assert_eq!(body.message, "Cannot read resume 'cv.pdf': disk full");
    }
}
