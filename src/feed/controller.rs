//! Pagination controller driving incremental ("infinite scroll") loading.
//!
//! The controller is a two-state machine (`Idle`, `Loading`). Every request
//! spawns a fetch task that reports back over a channel; the owner applies
//! completions with [`PaginationController::settle`] or
//! [`PaginationController::try_settle`]. Only one fetch is ever in flight.
//!
//! Each fetch captures the controller epoch at schedule time. `teardown`
//! bumps the epoch, so a completion that still arrives afterwards is
//! discarded without touching state.

use super::{FeedConfig, FeedResult, PageSource, Record};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Loading state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// No fetch outstanding
    Idle,
    /// A fetch is in flight
    Loading,
}

/// Result of asking the controller for more data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A fetch for `page` was scheduled
    Issued { page: usize },
    /// A fetch was already in flight; nothing was scheduled
    Dropped,
    /// The source reported end of data; nothing was scheduled
    Exhausted,
}

/// Result of applying a fetch completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Records were merged; `page` is the page index afterwards
    Applied { page: usize, received: usize },
    /// The completion belonged to a torn-down session and was ignored
    Stale,
    /// The source returned an error for `page`
    Failed { page: usize },
}

/// Notifications sent to subscribers after each transition
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    LoadStarted { page: usize, refresh: bool },
    RequestDropped { page: usize },
    PageApplied { page: usize, received: usize, total: usize },
    Exhausted { page: usize },
    StaleCompletionDiscarded { page: usize },
    FetchFailed { page: usize, message: String },
    TornDown,
}

/// Read-only summary of controller state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSnapshot {
    pub state: LoadState,
    pub page: usize,
    pub item_count: usize,
    pub has_more: bool,
    pub first_id: Option<String>,
    pub last_id: Option<String>,
    pub last_error: Option<String>,
}

struct Completion {
    epoch: u64,
    page: usize,
    refresh: bool,
    result: FeedResult<Vec<Record>>,
}

type Observer = Box<dyn Fn(&FeedEvent) + Send + Sync>;

/// Owns the accumulated list and coordinates page fetches
pub struct PaginationController {
    source: Arc<dyn PageSource>,
    config: FeedConfig,
    state: LoadState,
    page: usize,
    items: Vec<Record>,
    has_more: bool,
    epoch: u64,
    last_error: Option<String>,
    pending: Option<JoinHandle<()>>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    observers: Vec<Observer>,
}

impl fmt::Debug for PaginationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("page", &self.page)
            .field("items", &self.items.len())
            .field("has_more", &self.has_more)
            .field("epoch", &self.epoch)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PaginationController {
    /// Create an idle controller on page 1 with an empty list
    pub fn new(source: Arc<dyn PageSource>, config: FeedConfig) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            source,
            config,
            state: LoadState::Idle,
            page: 1,
            items: Vec::new(),
            has_more: true,
            epoch: 0,
            last_error: None,
            pending: None,
            completion_tx,
            completion_rx,
            observers: Vec::new(),
        }
    }

    /// Register an observer notified after every transition
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&FeedEvent) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            state: self.state,
            page: self.page,
            item_count: self.items.len(),
            has_more: self.has_more,
            first_id: self.items.first().map(|r| r.id.clone()),
            last_id: self.items.last().map(|r| r.id.clone()),
            last_error: self.last_error.clone(),
        }
    }

    /// Load page 1, replacing whatever is currently shown.
    ///
    /// Also serves as refresh. Dropped while another fetch is in flight.
    pub fn initial_load(&mut self) -> RequestOutcome {
        self.request(1, true)
    }

    /// Append the page after the current one
    pub fn load_next_page(&mut self) -> RequestOutcome {
        let next = self.page + 1;

        if self.is_loading() {
            return self.request(next, false);
        }

        if self.config.stop_at_end && !self.has_more {
            debug!("Source exhausted at page {}, not fetching page {}", self.page, next);
            return RequestOutcome::Exhausted;
        }

        self.request(next, false)
    }

    fn request(&mut self, page: usize, refresh: bool) -> RequestOutcome {
        if self.is_loading() {
            debug!("Fetch in flight, dropping request for page {}", page);
            self.emit(FeedEvent::RequestDropped { page });
            return RequestOutcome::Dropped;
        }

        self.state = LoadState::Loading;
        self.last_error = None;

        let source = Arc::clone(&self.source);
        let tx = self.completion_tx.clone();
        let epoch = self.epoch;
        let page_size = self.config.page_size;

        self.pending = Some(tokio::spawn(async move {
            let result = source.fetch_page(page, page_size).await;
            // Send only fails once the controller itself is gone
            let _ = tx.send(Completion {
                epoch,
                page,
                refresh,
                result,
            });
        }));

        debug!("Requested page {} (refresh: {})", page, refresh);
        self.emit(FeedEvent::LoadStarted { page, refresh });
        RequestOutcome::Issued { page }
    }

    /// Wait for the outstanding fetch and apply it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn settle(&mut self) -> Option<ApplyOutcome> {
        while self.is_loading() {
            let completion = self.completion_rx.recv().await?;
            match self.apply(completion) {
                ApplyOutcome::Stale => continue,
                outcome => return Some(outcome),
            }
        }
        None
    }

    /// Apply a completion if one is already waiting
    pub fn try_settle(&mut self) -> Option<ApplyOutcome> {
        while let Ok(completion) = self.completion_rx.try_recv() {
            match self.apply(completion) {
                ApplyOutcome::Stale => continue,
                outcome => return Some(outcome),
            }
        }
        None
    }

    fn apply(&mut self, completion: Completion) -> ApplyOutcome {
        if completion.epoch != self.epoch {
            debug!(
                "Discarding stale completion for page {} (epoch {} != {})",
                completion.page, completion.epoch, self.epoch
            );
            self.emit(FeedEvent::StaleCompletionDiscarded {
                page: completion.page,
            });
            return ApplyOutcome::Stale;
        }

        self.state = LoadState::Idle;
        self.pending = None;

        let records = match completion.result {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to load page {}: {}", completion.page, e);
                let message = e.to_string();
                self.last_error = Some(message.clone());
                self.emit(FeedEvent::FetchFailed {
                    page: completion.page,
                    message,
                });
                return ApplyOutcome::Failed {
                    page: completion.page,
                };
            }
        };

        let received = records.len();
        let exhausted = received < self.config.page_size;

        if completion.refresh {
            self.items = records;
            self.page = completion.page;
        } else {
            self.items.extend(records);
            // An empty page only moves the index when fetching past the end is allowed
            if received > 0 || !self.config.stop_at_end {
                self.page = completion.page;
            }
        }
        self.has_more = !exhausted;

        info!(
            "Applied page {} ({} received, {} total)",
            completion.page,
            received,
            self.items.len()
        );
        self.emit(FeedEvent::PageApplied {
            page: self.page,
            received,
            total: self.items.len(),
        });

        if exhausted {
            self.emit(FeedEvent::Exhausted { page: self.page });
        }

        ApplyOutcome::Applied {
            page: self.page,
            received,
        }
    }

    /// Reset to the initial state and orphan any in-flight fetch
    pub fn teardown(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.epoch = self.epoch.wrapping_add(1);
        self.state = LoadState::Idle;
        self.page = 1;
        self.items.clear();
        self.has_more = true;
        self.last_error = None;

        info!("Pagination controller torn down");
        self.emit(FeedEvent::TornDown);
    }

    fn emit(&self, event: FeedEvent) {
        for observer in &self.observers {
            observer(&event);
        }
    }
}

impl Drop for PaginationController {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
