//! Stackview - page data loader for the container manager UI
//!
//! Loads the view-model behind a project, service or image detail page
//! from the manager API and prints it.
//!
//! Exit codes:
//!   0 - View-model loaded
//!   1 - Runtime error (bad arguments, config, output)
//!   2 - The page load failed (the failure view-model is still printed)

mod cli;
mod config;
mod error;
mod fetch;
mod loader;
mod models;
mod render;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, OutputFormat, CONFIG_FILE_NAME};
use fetch::HttpFetcher;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    debug!("Stackview v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Load failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .stackview.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging on stderr; stdout is reserved for the view-model.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load one page and print it. Returns the exit code (0 or 2).
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate().context("Invalid configuration")?;

    // Both are present unless --init-config, which never gets here.
    let (Some(page), Some(id)) = (args.page, args.id.as_deref()) else {
        anyhow::bail!("A page and a resource id are required");
    };

    let fetcher = HttpFetcher::new(&config.api.base_url, config.api.timeout_seconds)
        .context("Failed to set up the API client")?;
    info!("Loading {} {} from {}", page, id, fetcher.base_url());

    let view = loader::load_page(&fetcher, page, id).await;

    let output = match config.output.format {
        OutputFormat::Json => render::generate_json(&view, config.output.pretty)?,
        OutputFormat::Markdown => render::generate_markdown(&view),
    };
    render::write_output(&output, args.output.as_deref())?;

    if let Some(ref path) = args.output {
        info!("View-model written to {}", path.display());
    }

    if view.is_failure() {
        warn!("The {} page for {} could not be loaded", page, id);
        return Ok(2);
    }

    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            debug!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
