//! Incremental feed core: mock record source, pagination controller and
//! the pure helpers the rendering surface needs.
//!
//! The controller owns all pagination state. Surfaces read it through
//! accessors, subscribe to [`FeedEvent`]s, and only ever signal two things
//! back: "near the end" (load the next page) and "display mode toggled"
//! (which never touches pagination).

pub mod controller;
pub mod error;
pub mod record;
pub mod render;
pub mod source;
pub mod viewport;

pub use controller::*;
pub use error::*;
pub use record::*;
pub use render::*;
pub use source::*;
pub use viewport::*;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the feed core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Records per page
    pub page_size: usize,

    /// Simulated fetch latency in milliseconds
    pub latency_ms: u64,

    /// Number of records the mock source generates
    pub universe_size: usize,

    /// Fraction of the viewport height that counts as "near the end"
    pub near_end_threshold: f32,

    /// Stop issuing fetches once a short or empty page was received
    pub stop_at_end: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            latency_ms: 800,
            universe_size: 100,
            near_end_threshold: 0.5,
            stop_at_end: true,
        }
    }
}

impl FeedConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> FeedResult<()> {
        if self.page_size == 0 {
            return Err(FeedError::InvalidConfig(
                "page_size must be greater than 0".to_string(),
            ));
        }

        if !(self.near_end_threshold > 0.0 && self.near_end_threshold <= 1.0) {
            return Err(FeedError::InvalidConfig(format!(
                "near_end_threshold must be in (0, 1], got {}",
                self.near_end_threshold
            )));
        }

        Ok(())
    }
}
