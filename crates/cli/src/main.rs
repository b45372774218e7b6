mod cli;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gsimg_core::{
    create_session, load_config, load_config_or_default, validate_config, AccessToken,
    CloudVisionClient, Config, GcsClient, GoogleDriveClient, GoogleSheetsClient, ImagePipeline,
    PipelineError, SanitizedConfig, StageEvent,
};

use cli::Cli;

/// Log filter used with `--verbose` when `RUST_LOG` is unset.
const VERBOSE_FILTER: &str = "gsimg_core=debug,analyze_gsimg=debug";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { VERBOSE_FILTER } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // A missing default config file is fine; a missing named one is not.
    let (config_path, explicit) = cli.config_path();
    let config = if explicit {
        load_config(&config_path)
    } else {
        load_config_or_default(&config_path)
    }
    .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;
    debug!(
        "Configuration: {}",
        serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default()
    );

    let request = cli.request(&config.defaults);
    println!("Processing file '{}'... please wait", request.file_name);

    if let Err(e) = request.validate() {
        return Ok(report_failure(&request.file_name, &e));
    }

    let timeout = Duration::from_secs(u64::from(config.endpoints.timeout_secs));
    let token = match authenticate(&config, timeout).await {
        Ok(token) => token,
        Err(e) => return Ok(report_failure(&request.file_name, &e)),
    };

    let pipeline =
        build_pipeline(&config, token, timeout, cli.verbose).context("Failed to create API clients")?;

    match pipeline.run(&request).await {
        Ok(report) => {
            println!("DONE: see {}", report.sheet_url());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(report_failure(&request.file_name, &e)),
    }
}

/// Obtain the bearer token shared by all four clients.
async fn authenticate(config: &Config, timeout: Duration) -> Result<AccessToken, PipelineError> {
    let session = create_session(&config.auth, timeout)?;
    info!("Using credentials: {}", session.method_name());

    let token = session.access_token().await?;
    if let Some(expires_at) = token.expires_at {
        debug!("Access token valid until {}", expires_at.to_rfc3339());
    }
    Ok(token)
}

fn build_pipeline(
    config: &Config,
    token: AccessToken,
    timeout: Duration,
    verbose: bool,
) -> Result<ImagePipeline> {
    let endpoints = &config.endpoints;

    let drive = GoogleDriveClient::new(&endpoints.drive, token.clone(), timeout)
        .context("Failed to create Drive client")?;
    let store = GcsClient::new(&endpoints.storage_upload, token.clone(), timeout)
        .context("Failed to create Cloud Storage client")?;
    let vision = CloudVisionClient::new(&endpoints.vision, token.clone(), timeout)
        .context("Failed to create Vision client")?;
    let sheets = GoogleSheetsClient::new(&endpoints.sheets, token, timeout)
        .context("Failed to create Sheets client")?;

    let mut pipeline = ImagePipeline::new(
        Arc::new(drive),
        Arc::new(store),
        Arc::new(vision),
        Arc::new(sheets),
    )
    .with_match_policy(config.drive.match_policy)
    .with_sheet_range(config.sheets.range.clone());

    if verbose {
        pipeline = pipeline.with_progress_callback(Arc::new(|event: &StageEvent| {
            println!("{}", event);
        }));
    }

    Ok(pipeline)
}

fn report_failure(file_name: &str, err: &PipelineError) -> ExitCode {
    println!("{}", failure_line(file_name, err));
    ExitCode::FAILURE
}

fn failure_line(file_name: &str, err: &PipelineError) -> String {
    let stage = err.stage().map_or("setup", |s| s.as_str());
    format!(
        "ERROR: could not process '{}' ({} stage): {}",
        file_name, stage, err
    )
}
