use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, sync::Arc};
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

mod config;
mod media;
mod session;
mod shell;
mod utils;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<String>,

    /// Files to select before the session starts
    files: Vec<PathBuf>,
}

fn get_config_path(args: &Args) -> Option<String> {
    config::find_config_path(args.config.as_deref())
}

fn init_logging(format: &str) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    // stdout belongs to the rendered session
    if format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = get_config_path(&args);
    let config = match &config_path {
        Some(path) => config::Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => config::Config::default(),
    }
    .with_env_overrides();

    init_logging(config.get_logging_format());

    info!("Starting dropzone...");
    match &config_path {
        Some(path) => info!("Loaded config from: {}", path),
        None => info!("No config file found, using defaults"),
    }

    let clients =
        media::MediaClients::from_config(&config).context("Failed to initialize media clients")?;
    let mut session =
        session::UploadSession::new(clients, Arc::new(session::TerminalNotifier), &config);

    if !args.files.is_empty() {
        let added = session.add_paths(&args.files).await;
        info!("Selected {} file(s) from the command line", added);
    }

    shell::run(session).await
}
