use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use super::run::RunCommand;
use crate::config::Config;
use crate::{init_logging, tui, LogTarget};

/// pagefeed - an infinite-scroll feed in your terminal
#[derive(Debug, Parser)]
#[command(
    name = "pagefeed",
    version,
    about = "An infinite-scroll feed in your terminal",
    long_about = r#"pagefeed shows a mock feed that loads one page at a time as you scroll.

Examples:
  pagefeed                          # Start interactive mode
  pagefeed run --pages 12           # Scripted session, text transcript
  pagefeed run -f json              # Same, as JSON
  pagefeed --latency-ms 0 run       # Skip the simulated network delay"#
)]
pub struct Cli {
    /// Path to a pagefeed.json config file
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Records per page
    #[arg(long = "page-size", global = true)]
    pub page_size: Option<usize>,

    /// Simulated fetch latency in milliseconds
    #[arg(long = "latency-ms", global = true)]
    pub latency_ms: Option<u64>,

    /// Number of mock records
    #[arg(long = "universe", global = true)]
    pub universe_size: Option<usize>,

    /// Keep fetching after the source returned a short or empty page
    #[arg(long = "keep-fetching", global = true)]
    pub keep_fetching: bool,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a scripted scroll session non-interactively
    Run(RunCommand),

    /// Print the resolved configuration as JSON
    Config,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let mut config = Config::init(self.config.as_deref()).await?;
        self.apply_overrides(&mut config);
        config.validate()?;

        match &self.command {
            Some(Commands::Run(run_cmd)) => {
                init_logging(self.debug, LogTarget::Stderr)?;
                debug!("Configuration initialized: {:?}", config);
                run_cmd.execute(&config).await
            }
            Some(Commands::Config) => {
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
            None => {
                std::fs::create_dir_all(&config.data_dir)?;
                init_logging(self.debug, LogTarget::File(config.log_file()))?;
                debug!("Configuration initialized: {:?}", config);
                self.start_interactive_mode(&config).await
            }
        }
    }

    /// Command-line flags win over file and environment values
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(page_size) = self.page_size {
            config.feed.page_size = page_size;
        }
        if let Some(latency_ms) = self.latency_ms {
            config.feed.latency_ms = latency_ms;
        }
        if let Some(universe_size) = self.universe_size {
            config.feed.universe_size = universe_size;
        }
        if self.keep_fetching {
            config.feed.stop_at_end = false;
        }
    }

    async fn start_interactive_mode(&self, config: &Config) -> Result<()> {
        info!("Starting interactive mode");
        tui::run(config).await?;
        info!("Application finished");
        Ok(())
    }
}
