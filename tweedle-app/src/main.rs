use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use task::{PostArgs, build_from_config};
use tweedle_common::observability::{LogConfig, init_logging};
use tweedle_config::{LoggingConfig, TweedleConfig, TweedleConfigLoader};
use tweedle_social::twitter::TwitterClientFactory;
mod task;

/// Post build status updates to Twitter/X from a pipeline step.
#[derive(Debug, Parser)]
#[command(name = "tweedle", version)]
struct Cli {
    /// YAML config; may be absent when everything comes from `TWEEDLE__*` env vars.
    #[arg(short, long, env = "TWEEDLE_CONFIG", default_value = "tweedle.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send a status update through every configured client.
    Post(PostArgs),
    /// Resolve every configured account without posting.
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins)
    let cfg: TweedleConfig = TweedleConfigLoader::new()
        .with_optional_file(&cli.config)
        .load()?;

    let log_config = cfg
        .logging
        .as_ref()
        .map(LoggingConfig::to_log_config)
        .unwrap_or_else(|| LogConfig {
            emit_stderr: true,
            ..LogConfig::default()
        });
    let log_path = init_logging(log_config)?;
    tracing::debug!(path = %log_path.display(), "logging initialised");

    let mut task = build_from_config(&cfg, Arc::new(TwitterClientFactory::new())).await?;

    match cli.command {
        Command::Post(args) => task.post(&args).await?,
        Command::Check => task.check(&mut std::io::stdout().lock())?,
    }

    Ok(())
}
