// src/main.rs

//! quran-indexer CLI
//!
//! Normal mode ingests every catalog edition; `--rerun --links_list <path>`
//! replays the failed section URLs recorded in a previous run's log.

use std::path::PathBuf;

use clap::Parser;

use quran_indexer::{
    config::Config,
    error::Result,
    index::ElasticsearchIndex,
    models::SectionScheme,
    pipeline::{FailureLog, run_ingest, run_rerun},
    services::{EditionCatalog, SectionFetcher},
    utils::http,
};

/// quran-indexer - Quran edition ingestion pipeline
#[derive(Parser, Debug)]
#[command(
    name = "quran-indexer",
    version,
    about = "Ingests Quran editions into per-edition search indices"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Section scheme to paginate with (overrides the config file)
    #[arg(long, value_enum)]
    scheme: Option<SectionScheme>,

    /// Replay failures from a log instead of running a full ingest
    #[arg(long)]
    rerun: bool,

    /// Failure log to replay (required with --rerun)
    #[arg(long = "links_list", value_name = "PATH", required_if_eq("rerun", "true"))]
    links_list: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(scheme) = cli.scheme {
        config.run.scheme = scheme;
    }
    config.validate()?;

    let client = http::create_client(&config.api)?;
    let catalog = EditionCatalog::new(client.clone(), config.api.editions_url.clone());
    let fetcher = SectionFetcher::new(client.clone(), &config.api);
    let backend = ElasticsearchIndex::new(client, &config.search);
    let failure_log = FailureLog::open(&config.run.failure_log)?;

    if cli.rerun {
        // clap enforces the pairing; the unwrap cannot fire.
        let links_list = cli.links_list.expect("--links_list required with --rerun");
        let stats = run_rerun(
            &config,
            &catalog,
            &fetcher,
            &backend,
            &failure_log,
            &links_list,
        )
        .await?;
        log::info!(
            "Backfilled {} documents across {} sections",
            stats.documents_indexed,
            stats.sections_indexed
        );
    } else {
        let stats = run_ingest(&config, &catalog, &fetcher, &backend, &failure_log).await?;
        // Partial failures are an expected, recoverable outcome; the run
        // still exits cleanly. Only an unavailable catalog is fatal.
        if stats.sections_fetch_failed + stats.sections_write_failed + stats.documents_failed > 0 {
            log::warn!(
                "Run finished with failures; rerun them with: \
                 quran-indexer --rerun --links_list {}",
                config.run.failure_log
            );
        }
    }

    log::info!("Done!");

    Ok(())
}
