mod cli;
mod state;

use anyhow::{anyhow, Context};
use clap::Parser;
use infra::config::AppConfigImpl;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

use cli::Cli;
use state::AppState;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {m}{n}";

fn init_logging(log_file: &str) -> anyhow::Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(log_file)
        .with_context(|| format!("cannot open log file {}", log_file))?;
    // stdout carries command output
    let console = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .target(Target::Stderr)
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .appender(Appender::builder().build("stderr", Box::new(console)))
        .build(
            Root::builder()
                .appender("file")
                .appender("stderr")
                .build(log_level.parse().unwrap_or(log::LevelFilter::Info)),
        )?;

    log4rs::init_config(config)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => AppConfigImpl::load_from_file(path),
        None => AppConfigImpl::load(),
    }
    .map_err(|e| anyhow!("failed to load config: {}", e))?;
    init_logging(&cfg.log_file())?;

    let repos = AppState::init_store(&cfg).await?;
    let state = AppState::new(&cfg, repos).await?;
    cli::run(&state, cli.command).await
}
