//! Command-line front end for the manifest exception processor.
//!
//! With no file argument the binary authenticates, probes service health,
//! and lists what it can do. With a file argument it submits the PDF and
//! renders the extraction results.

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use manifest_client::{config, ClientConfig, ManifestClient};
use manifest_domain::constants::{
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SYNC_TIMEOUT_SECS,
    DEFAULT_WAIT_TIMEOUT_SECS,
};
use manifest_domain::BatchStatus;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Process freight-manifest PDFs through the document-intelligence API
#[derive(Parser, Debug)]
#[command(name = "manifest-processor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// PDF to process; omit to run a connectivity check
    file: Option<PathBuf>,

    /// Execution mode for the submission
    #[arg(long, value_enum, default_value_t = Execution::Sync)]
    execution: Execution,

    /// Caller tag attached to the submission (defaults to cli-<unix-seconds>)
    #[arg(long)]
    identifier: Option<String>,

    /// Explicit batch identifier for async submissions
    #[arg(long)]
    batch_id: Option<String>,

    /// Seconds to wait for an async batch to complete
    #[arg(long)]
    wait_timeout: Option<u64>,

    /// Accept self-signed TLS certificates
    #[arg(long)]
    insecure: bool,

    /// API origin, e.g. https://api.example.com (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Username for the token endpoint (overrides config)
    #[arg(long)]
    username: Option<String>,

    /// Password for the token endpoint (overrides config)
    #[arg(long)]
    password: Option<String>,

    /// Enable verbose logging (can be repeated: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Execution mode for a submission
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Execution {
    /// Block until the server returns the processed result
    Sync,
    /// Submit, then poll until the batch completes
    Async,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                format!("manifest_client={log_level},manifest_processor={log_level}")
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = resolve_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, "resolved configuration");

    let client = ManifestClient::new(config)?;

    println!("Manifest Exception Processor");
    println!("{}", "=".repeat(60));

    println!("Authenticating with API...");
    let token = client.authenticate().await.context("could not authenticate")?;
    let preview: String = token.chars().take(20).collect();
    println!("Authentication successful (token {preview}...)");

    let Some(file) = &cli.file else {
        connectivity_report(&client).await;
        return Ok(ExitCode::SUCCESS);
    };

    let document =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let identifier = cli.identifier.clone().unwrap_or_else(default_identifier);

    println!();
    match cli.execution {
        Execution::Sync => println!("Processing {} synchronously...", file.display()),
        Execution::Async => println!("Processing {} asynchronously...", file.display()),
    }

    let outcome = match cli.execution {
        Execution::Sync => client.submit_sync(&document, &identifier).await,
        Execution::Async => {
            process_async(&client, &document, &identifier, cli.batch_id.clone()).await
        }
    };

    match outcome {
        Ok(status) => {
            println!("Processing complete");
            print!("{}", render::render_batch(&status));
        }
        Err(err) => {
            // A failed submission is reported, not escalated to a bad exit
            eprintln!("Processing failed: {err}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Submit in async mode, report the acknowledgment, and poll to completion.
async fn process_async(
    client: &ManifestClient,
    document: &[u8],
    identifier: &str,
    batch_id: Option<String>,
) -> manifest_domain::Result<BatchStatus> {
    let accepted = client.submit_async(document, identifier, batch_id).await?;
    println!(
        "Batch {} accepted (state: {})",
        accepted.metadata.identifier, accepted.metadata.state
    );
    println!("Waiting for completion...");
    client.wait_for_completion(&accepted.metadata.identifier, None).await
}

async fn connectivity_report(client: &ManifestClient) {
    println!();
    println!("Checking API health...");
    if client.health_check().await {
        println!("API is healthy");
    } else {
        println!("API health check failed");
    }

    println!();
    println!("Available operations:");
    println!("- Synchronous PDF processing");
    println!("- Asynchronous PDF processing");
    println!("- Batch status monitoring");
    println!("- Health checks");

    println!();
    println!("To process a PDF, pass the file path as an argument:");
    println!("  manifest-processor /path/to/manifest.pdf");
}

/// Merge configuration sources: flags > environment > config file.
fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match config::load() {
        Ok(config) => config,
        Err(err) => {
            // Flags can stand in for a missing config when every
            // connection setting is supplied on the command line
            if let (Some(base_url), Some(username), Some(password)) =
                (&cli.base_url, &cli.username, &cli.password)
            {
                ClientConfig {
                    base_url: base_url.clone(),
                    username: username.clone(),
                    password: password.clone(),
                    accept_invalid_certs: false,
                    request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                    sync_timeout_secs: DEFAULT_SYNC_TIMEOUT_SECS,
                    poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
                    wait_timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
                }
            } else {
                return Err(err).context("could not load configuration");
            }
        }
    };

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(username) = &cli.username {
        config.username = username.clone();
    }
    if let Some(password) = &cli.password {
        config.password = password.clone();
    }
    if cli.insecure {
        config.accept_invalid_certs = true;
    }
    if let Some(secs) = cli.wait_timeout {
        config.wait_timeout_secs = secs;
    }

    Ok(config)
}

fn default_identifier() -> String {
    format!("cli-{}", chrono::Utc::now().timestamp())
}
