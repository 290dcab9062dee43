//! termlift CLI - binary entry point.
//!
//! # Architecture
//!
//! The binary wires the library crates into the one-shot pipeline:
//!
//! ```text
//! main() -> run() -> load_manifest() -> ingest_metrics() -> IngestReport
//!                          |                  |
//!                   termlift-manifest   RestEmitter | DryRunEmitter
//! ```
//!
//! Exit code 0 means every metric found was emitted (or there was nothing to
//! do); any fatal error or per-metric failure exits 1 with the reason on
//! stderr.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use termlift_emitter::{DryRunEmitter, RestEmitter};
use termlift_ingest::{IngestOptions, IngestReport, ingest_metrics};
use termlift_manifest::load_manifest;
use termlift_types::Environment;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use config::Settings;

#[derive(Parser)]
#[command(name = "termlift", version)]
#[command(about = "Publish dbt metrics into a metadata catalog business glossary")]
struct Cli {
    /// Path to a TOML config file (default: ~/.config/termlift/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG wins when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a dbt manifest and publish its metrics as glossary terms.
    Ingest(IngestArgs),
    /// Verify the catalog is reachable and the token is accepted.
    Check(ConnectionArgs),
}

#[derive(Args)]
struct ConnectionArgs {
    /// Metadata service URL.
    #[arg(long)]
    server: Option<String>,
    /// Bearer token for the metadata service.
    #[arg(long, env = "DATAHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Args)]
struct IngestArgs {
    #[command(flatten)]
    connection: ConnectionArgs,
    /// Path to the dbt manifest.json.
    #[arg(long)]
    manifest: PathBuf,
    /// Platform component of upstream dataset URNs.
    #[arg(long)]
    platform: Option<String>,
    /// Fabric environment of upstream dataset URNs (PROD, DEV, ...).
    #[arg(long)]
    env: Option<Environment>,
    /// Root glossary node everything is parented under.
    #[arg(long)]
    glossary_root: Option<String>,
    /// Build every proposal but emit nothing.
    #[arg(long)]
    dry_run: bool,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::try_new("info").expect("info filter is valid")),
        1 => EnvFilter::try_new("debug").expect("debug filter is valid"),
        _ => EnvFilter::try_new("trace").expect("trace filter is valid"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let file = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Ingest(args) => {
            let settings = Settings::resolve(
                &file,
                args.connection.server,
                args.platform,
                args.env,
                args.glossary_root,
            )?;
            let report = run_ingest(&settings, args.manifest, args.connection.token, args.dry_run)
                .await?;
            Ok(if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Check(conn) => {
            let settings = Settings::resolve(&file, conn.server, None, None, None)?;
            let emitter = RestEmitter::new(&settings.server, conn.token)?;
            emitter
                .check_connection()
                .await
                .with_context(|| format!("connection check against {} failed", settings.server))?;
            println!("connection to {} verified", settings.server);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_ingest(
    settings: &Settings,
    manifest_path: PathBuf,
    token: Option<String>,
    dry_run: bool,
) -> Result<IngestReport> {
    let manifest = load_manifest(&manifest_path)?;
    let options = IngestOptions {
        platform: settings.platform.clone(),
        env: settings.env,
        glossary_root: settings.glossary_root.clone(),
    };

    let report = if dry_run {
        tracing::info!("Dry run: nothing will be emitted");
        let emitter = DryRunEmitter::new();
        let report = ingest_metrics(&manifest, &options, &emitter).await?;
        println!("dry run: {report} ({} proposals held back)", emitter.skipped());
        report
    } else {
        let emitter = RestEmitter::new(&settings.server, token)?;
        let report = ingest_metrics(&manifest, &options, &emitter).await?;
        println!("{report}");
        report
    };

    for failure in &report.failures {
        tracing::warn!(metric = %failure.metric, reason = %failure.reason, "Metric not ingested");
    }
    Ok(report)
}
