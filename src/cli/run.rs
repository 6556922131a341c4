use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::feed::{FeedSnapshot, MockDataSource, PaginationController, RequestOutcome};

/// Drive a scripted scroll session without a terminal UI
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Number of "near end" signals to send after the initial load
    #[arg(short = 'p', long = "pages", default_value = "10")]
    pub pages: usize,

    /// Refresh after this many next-page signals
    #[arg(long = "refresh-after")]
    pub refresh_after: Option<usize>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// One line of the session transcript
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub action: &'static str,
    pub outcome: String,
    #[serde(flatten)]
    pub snapshot: FeedSnapshot,
}

impl RunCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        debug!("Executing run command");

        config.validate()?;

        let source = MockDataSource::new(config.feed.universe_size, config.feed.latency());
        info!(
            "Mock source: {} records, {} pages of {}",
            source.universe_size(),
            source.total_pages(config.feed.page_size),
            config.feed.page_size
        );
        let mut controller = PaginationController::new(Arc::new(source), config.feed.clone());

        let steps = self.script(&mut controller).await?;
        controller.teardown();

        println!("{}", render_steps(&steps, self.format)?);
        Ok(())
    }

    /// Initial load, `pages` next-page signals, and the optional refresh
    pub async fn script(&self, controller: &mut PaginationController) -> Result<Vec<Step>> {
        let mut steps = Vec::with_capacity(self.pages + 2);

        let outcome = controller.initial_load();
        steps.push(Self::finish("initial_load", outcome, controller).await?);

        for n in 1..=self.pages {
            let outcome = controller.load_next_page();
            steps.push(Self::finish("load_next_page", outcome, controller).await?);

            if self.refresh_after == Some(n) {
                info!("Refreshing after {} pages", n);
                let outcome = controller.initial_load();
                steps.push(Self::finish("refresh", outcome, controller).await?);
            }
        }

        Ok(steps)
    }

    async fn finish(
        action: &'static str,
        outcome: RequestOutcome,
        controller: &mut PaginationController,
    ) -> Result<Step> {
        let outcome = match outcome {
            RequestOutcome::Issued { page } => {
                let applied = controller
                    .settle()
                    .await
                    .ok_or_else(|| anyhow!("fetch for page {} never completed", page))?;
                format!("fetched page {} -> {:?}", page, applied)
            }
            RequestOutcome::Dropped => "dropped (fetch in flight)".to_string(),
            RequestOutcome::Exhausted => "skipped (source exhausted)".to_string(),
        };

        Ok(Step {
            action,
            outcome,
            snapshot: controller.snapshot(),
        })
    }
}

/// Format a transcript for stdout
pub fn render_steps(steps: &[Step], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(steps)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for (i, step) in steps.iter().enumerate() {
                let range = match (&step.snapshot.first_id, &step.snapshot.last_id) {
                    (Some(first), Some(last)) => format!("{}..{}", first, last),
                    _ => "-".to_string(),
                };
                writeln!(
                    out,
                    "{:>3}  {:<15} page={:<3} items={:<4} {:<22} more={:<5} {}",
                    i + 1,
                    step.action,
                    step.snapshot.page,
                    step.snapshot.item_count,
                    range,
                    step.snapshot.has_more,
                    step.outcome,
                )?;
            }
            Ok(out.trim_end().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedConfig;

    fn command(pages: usize, refresh_after: Option<usize>) -> RunCommand {
        RunCommand {
            pages,
            refresh_after,
            format: OutputFormat::Text,
        }
    }

    fn controller() -> PaginationController {
        let config = FeedConfig::default();
        let source = MockDataSource::new(config.universe_size, config.latency());
        PaginationController::new(Arc::new(source), config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_script_scrolls_whole_feed() {
        let mut controller = controller();
        let steps = command(11, None).script(&mut controller).await.unwrap();

        assert_eq!(steps.len(), 12);
        assert_eq!(steps[0].snapshot.item_count, 10);
        assert_eq!(steps[1].snapshot.item_count, 20);
        assert_eq!(steps[1].snapshot.page, 2);

        let full = &steps[10].snapshot;
        assert_eq!(full.item_count, 100);
        assert_eq!(full.last_id.as_deref(), Some("item-100"));
        assert!(!full.has_more);

        assert_eq!(steps[11].outcome, "skipped (source exhausted)");
        assert_eq!(steps[11].snapshot.page, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_script_refresh() {
        let mut controller = controller();
        let steps = command(3, Some(2)).script(&mut controller).await.unwrap();

        assert_eq!(steps.len(), 5);
        assert_eq!(steps[3].action, "refresh");
        assert_eq!(steps[3].snapshot.item_count, 10);
        assert_eq!(steps[3].snapshot.page, 1);
        assert_eq!(steps[4].snapshot.item_count, 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_formats() {
        let mut controller = controller();
        let steps = command(1, None).script(&mut controller).await.unwrap();

        let text = render_steps(&steps, OutputFormat::Text).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("item-1..item-20"));

        let json = render_steps(&steps, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["item_count"], 20);
        assert_eq!(value[1]["state"], "idle");
        assert_eq!(value[0]["action"], "initial_load");
    }
}
