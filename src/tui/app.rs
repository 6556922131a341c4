use crate::config::Config;
use crate::feed::{
    DisplayMode, FeedEvent, LoadState, MockDataSource, NearEnd, PaginationController,
    RequestOutcome,
};
use crate::tui::{
    components::{Action, Component, DisplayToggle, FeedList, FeedView},
    events::Event,
    keys::KeyMap,
    styles::Theme,
    Frame,
};
use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Main application state and controller
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    controller: PaginationController,
    display: DisplayMode,
    header: DisplayToggle,
    feed_list: FeedList,
    key_map: KeyMap,
    theme: Theme,
    show_help: bool,
    mounted: bool,

    /// Last controller notification, written by the observer
    status_message: Arc<Mutex<Option<String>>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        let feed = config.feed.clone();
        let source = MockDataSource::new(feed.universe_size, feed.latency());
        let near_end = NearEnd::new(feed.near_end_threshold);
        let mut controller = PaginationController::new(Arc::new(source), feed);

        let status_message = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&status_message);
        controller.subscribe(move |event| {
            if let Some(message) = status_for(event) {
                if let Ok(mut status) = sink.lock() {
                    *status = Some(message);
                }
            }
        });

        let key_map = KeyMap::default();

        Self {
            should_quit: false,
            controller,
            display: DisplayMode::default(),
            header: DisplayToggle::new(key_map.toggle_display.clone()),
            feed_list: FeedList::new(near_end, key_map.clone()),
            key_map,
            theme: Theme::default(),
            show_help: false,
            mounted: false,
            status_message,
        }
    }

    /// Start the session with page 1
    pub fn mount(&mut self) {
        info!("Mounting feed screen");
        self.mounted = true;
        self.controller.initial_load();
    }

    /// Reset pagination; completions still in flight are ignored
    pub fn unmount(&mut self) {
        info!("Unmounting feed screen");
        self.mounted = false;
        self.controller.teardown();
    }

    #[cfg(test)]
    pub fn controller(&self) -> &PaginationController {
        &self.controller
    }

    #[cfg(test)]
    pub fn display(&self) -> DisplayMode {
        self.display
    }

    /// Handle incoming events; returns true when the app should exit
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        let action = match event {
            Event::Key(key_event) => {
                if self.key_map.should_quit(&key_event) {
                    self.should_quit = true;
                    return Ok(true);
                }

                if self.key_map.should_show_help(&key_event) {
                    self.show_help = !self.show_help;
                    return Ok(false);
                }

                let view = Self::view(&self.controller, self.display);
                self.header
                    .handle_key_event(key_event, &view)
                    .or_else(|| self.feed_list.handle_key_event(key_event, &view))
            }

            Event::Mouse(mouse_event) => {
                let view = Self::view(&self.controller, self.display);
                self.header
                    .handle_mouse_event(mouse_event, &view)
                    .or_else(|| self.feed_list.handle_mouse_event(mouse_event, &view))
            }

            // The next draw picks up the new size
            Event::Resize(width, height) => {
                debug!("Terminal resized to {}x{}", width, height);
                None
            }

            Event::Tick if !self.mounted => None,

            Event::Tick => {
                self.controller.try_settle();
                let view = Self::view(&self.controller, self.display);
                self.feed_list.poll_near_end(&view)
            }
        };

        if let Some(action) = action {
            self.dispatch(action);
        }

        Ok(self.should_quit)
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::LoadNextPage => {
                if let RequestOutcome::Exhausted = self.controller.load_next_page() {
                    debug!("Near-end signal ignored, feed exhausted");
                }
            }
            Action::Refresh => match self.controller.initial_load() {
                RequestOutcome::Issued { .. } => self.feed_list.reset_scroll(),
                _ => self.set_status("busy, refresh skipped"),
            },
            Action::ToggleDisplay => {
                let hidden = self.display.toggle();
                debug!("Message bodies {}", if hidden { "hidden" } else { "shown" });
            }
        }
    }

    fn set_status(&self, message: &str) {
        if let Ok(mut status) = self.status_message.lock() {
            *status = Some(message.to_string());
        }
    }

    fn view(controller: &PaginationController, mode: DisplayMode) -> FeedView<'_> {
        FeedView {
            items: controller.items(),
            page: controller.page(),
            loading: controller.is_loading(),
            has_more: controller.has_more(),
            mode,
            last_error: controller.last_error(),
        }
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.size();
        frame.render_widget(Block::default().style(self.theme.base_style()), size);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Display switch
                Constraint::Min(1),    // Feed
                Constraint::Length(1), // Status bar
            ])
            .split(size);

        let view = Self::view(&self.controller, self.display);
        self.header.render(frame, chunks[0], &self.theme, &view);
        self.feed_list.render(frame, chunks[1], &self.theme, &view);
        self.render_status_bar(frame, chunks[2]);

        if self.show_help {
            self.render_help_overlay(frame, size);
        }
    }

    /// Render the status bar
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let state = match self.controller.state() {
            LoadState::Loading => "loading",
            LoadState::Idle => "idle",
        };

        let mut spans = vec![Span::raw(format!(
            " page {} · {} items · {} ",
            self.controller.page(),
            self.controller.items().len(),
            state
        ))];

        if let Ok(status) = self.status_message.lock() {
            if let Some(message) = status.as_ref() {
                spans.push(Span::styled(format!("· {} ", message), self.theme.warning_style()));
            }
        }
        spans.push(Span::styled("· ? for help", self.theme.dim_style()));

        let status_bar = Paragraph::new(Line::from(spans)).style(self.theme.status_bar_style());
        frame.render_widget(status_bar, area);
    }

    /// Render the key binding overlay
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help = self.key_map.help_text();
        let height = (help.lines().count() as u16 + 2).min(area.height);
        let width = 40.min(area.width);
        let popup = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        let paragraph = Paragraph::new(help).style(self.theme.help_style()).block(
            Block::default()
                .title(" Keys ")
                .borders(Borders::ALL)
                .border_style(self.theme.focused_border_style()),
        );

        frame.render_widget(Clear, popup);
        frame.render_widget(paragraph, popup);
    }
}

/// Status line text for controller notifications worth surfacing
fn status_for(event: &FeedEvent) -> Option<String> {
    match event {
        FeedEvent::LoadStarted { page, refresh: true } => Some(format!("refreshing from page {}", page)),
        FeedEvent::LoadStarted { page, .. } => Some(format!("loading page {}", page)),
        FeedEvent::PageApplied { page, received, .. } => {
            Some(format!("page {} loaded ({} new)", page, received))
        }
        FeedEvent::Exhausted { .. } => Some("no more items".to_string()),
        FeedEvent::FetchFailed { page, message } => Some(format!("page {} failed: {}", page, message)),
        FeedEvent::TornDown => Some("reset".to_string()),
        FeedEvent::RequestDropped { .. } | FeedEvent::StaleCompletionDiscarded { .. } => None,
    }
}
