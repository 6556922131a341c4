pub mod display_toggle;
pub mod feed_list;

pub use display_toggle::DisplayToggle;
pub use feed_list::FeedList;

use crate::feed::{DisplayMode, Record};
use crate::tui::{styles::Theme, Frame};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;

/// What the screen currently shows, pulled from the controller each frame
#[derive(Debug, Clone, Copy)]
pub struct FeedView<'a> {
    pub items: &'a [Record],
    pub page: usize,
    pub loading: bool,
    pub has_more: bool,
    pub mode: DisplayMode,
    pub last_error: Option<&'a str>,
}

/// Requests a component sends back to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The user scrolled near the end of the loaded rows
    LoadNextPage,
    /// Reload from page 1
    Refresh,
    /// Flip body visibility
    ToggleDisplay,
}

/// Base trait for all UI components
pub trait Component {
    /// Handle keyboard input
    fn handle_key_event(&mut self, event: KeyEvent, view: &FeedView<'_>) -> Option<Action> {
        let _ = (event, view);
        None
    }

    /// Handle mouse input
    fn handle_mouse_event(&mut self, event: MouseEvent, view: &FeedView<'_>) -> Option<Action> {
        let _ = (event, view);
        None
    }

    /// Render the component
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, view: &FeedView<'_>);
}

/// Base component state
#[derive(Debug, Clone, Default)]
pub struct ComponentState {
    pub size: Rect,
}

impl ComponentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.size.x
            && column < self.size.x.saturating_add(self.size.width)
            && row >= self.size.y
            && row < self.size.y.saturating_add(self.size.height)
    }
}
