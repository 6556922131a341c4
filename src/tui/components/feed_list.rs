//! Scrollable feed list that asks for the next page near the bottom.
//!
//! Only the rows inside the viewport are turned into widgets. The list
//! never mutates the feed: it reads a [`FeedView`] and answers with
//! [`Action`]s.

use super::{Action, Component, ComponentState, FeedView};
use crate::feed::{key_of, render_item, NearEnd, Viewport};
use crate::tui::{keys::KeyMap, styles::Theme, Frame};
use crossterm::event::{KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use tracing::debug;

pub struct FeedList {
    state: ComponentState,
    viewport: Viewport,
    near_end: NearEnd,
    keys: KeyMap,
    /// Loaded length when the last near-end signal went out
    signalled_at: Option<usize>,
}

impl FeedList {
    pub fn new(near_end: NearEnd, keys: KeyMap) -> Self {
        Self {
            state: ComponentState::new(),
            viewport: Viewport::new(0),
            near_end,
            keys,
            signalled_at: None,
        }
    }

    #[cfg(test)]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Back to the top, e.g. after a refresh replaced the list
    pub fn reset_scroll(&mut self) {
        self.viewport.reset();
        self.signalled_at = None;
    }

    /// Emit `LoadNextPage` once per loaded length when the viewport nears the end.
    pub fn poll_near_end(&mut self, view: &FeedView<'_>) -> Option<Action> {
        if view.loading {
            return None;
        }

        let len = view.items.len();
        let last_visible = self.viewport.last_visible(len);
        if !self.near_end.reached(last_visible, len, self.viewport.height()) {
            return None;
        }

        if self.signalled_at == Some(len) {
            return None;
        }
        self.signalled_at = Some(len);

        debug!(
            "Near end of feed at {} (row {} of {})",
            view.items.get(last_visible).map(key_of).unwrap_or("-"),
            last_visible,
            len
        );
        Some(Action::LoadNextPage)
    }

    fn footer(view: &FeedView<'_>, theme: &Theme) -> Option<ListItem<'static>> {
        let line = if let Some(error) = view.last_error {
            Line::from(Span::styled(format!("Failed to load: {}", error), theme.error_style()))
        } else if view.loading {
            Line::from(Span::styled("Loading…", theme.placeholder_style()))
        } else if !view.has_more {
            Line::from(Span::styled("· end of feed ·", theme.placeholder_style()))
        } else {
            return None;
        };
        Some(ListItem::new(line))
    }
}

impl Component for FeedList {
    fn handle_key_event(&mut self, event: KeyEvent, view: &FeedView<'_>) -> Option<Action> {
        let len = view.items.len();

        if self.keys.refresh.matches(&event) {
            return Some(Action::Refresh);
        }

        if self.keys.down.matches(&event) {
            self.viewport.move_by(1, len);
        } else if self.keys.up.matches(&event) {
            self.viewport.move_by(-1, len);
        } else if self.keys.page_down.matches(&event) {
            self.viewport.page_down(len);
        } else if self.keys.page_up.matches(&event) {
            self.viewport.page_up(len);
        } else if self.keys.top.matches(&event) {
            self.viewport.to_top();
        } else if self.keys.bottom.matches(&event) {
            self.viewport.to_bottom(len);
        } else {
            return None;
        }

        self.poll_near_end(view)
    }

    fn handle_mouse_event(&mut self, event: MouseEvent, view: &FeedView<'_>) -> Option<Action> {
        if !self.state.contains(event.column, event.row) {
            return None;
        }

        let len = view.items.len();
        match event.kind {
            MouseEventKind::ScrollDown => self.viewport.move_by(1, len),
            MouseEventKind::ScrollUp => self.viewport.move_by(-1, len),
            _ => return None,
        }
        self.poll_near_end(view)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, view: &FeedView<'_>) {
        self.state.size = area;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.focused_border_style())
            .title(format!(" Feed · page {} · {} items ", view.page, view.items.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let len = view.items.len();
        let rows = (inner.height / view.mode.item_height()).max(1) as usize;
        self.viewport.set_height(rows, len);

        let offset = self.viewport.offset();
        let end = (offset + rows).min(len);
        let selected = self.viewport.selected();

        let mut items: Vec<ListItem> = view.items[offset..end]
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let item = ListItem::new(render_item(record, view.mode));
                if offset + i == selected {
                    item.style(theme.selection_style())
                } else {
                    item
                }
            })
            .collect();

        if end == len {
            items.extend(Self::footer(view, theme));
        }

        frame.render_widget(List::new(items).style(theme.text_style()), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::DisplayMode;
    use crate::tui::components::test_support::{buffer_text, records, view};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn list() -> FeedList {
        FeedList::new(NearEnd::new(0.5), KeyMap::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn draw(list: &mut FeedList, view: &FeedView<'_>, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, height)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| {
                let area = frame.size();
                list.render(frame, area, &theme, view);
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_renders_titles_and_bodies() {
        let items = records(3);
        let text = draw(&mut list(), &view(&items), 12);

        assert!(text.contains("User 1"));
        assert!(text.contains("User 3"));
        assert!(text.contains("LastMessage."));
        assert!(text.contains("3 items"));
    }

    #[test]
    fn test_hidden_bodies_are_not_rendered() {
        let items = records(3);
        let mut feed = view(&items);
        feed.mode = DisplayMode::new(true);

        let text = draw(&mut list(), &feed, 12);
        assert!(text.contains("User 2"));
        assert!(!text.contains("LastMessage."));
    }

    #[test]
    fn test_footer_rows() {
        let items = records(2);
        let mut feed = view(&items);

        feed.loading = true;
        assert!(draw(&mut list(), &feed, 12).contains("Loading…"));

        feed.loading = false;
        feed.has_more = false;
        assert!(draw(&mut list(), &feed, 12).contains("end of feed"));

        feed.last_error = Some("timeout");
        assert!(draw(&mut list(), &feed, 12).contains("Failed to load: timeout"));
    }

    #[test]
    fn test_only_visible_rows_render() {
        let items = records(50);
        let mut list = list();
        let text = draw(&mut list, &view(&items), 11);

        // 9 inner lines at 3 lines per record
        assert_eq!(list.viewport().height(), 3);
        assert!(text.contains("User 3"));
        assert!(!text.contains("User 4 "));
    }

    #[test]
    fn test_near_end_signals_once_per_length() {
        let items = records(10);
        let mut list = list();
        let feed = view(&items);
        draw(&mut list, &feed, 11);

        // Rows 0..=2 visible, 7 remain; allowance is 1
        assert_eq!(list.poll_near_end(&feed), None);

        for _ in 0..7 {
            assert_eq!(list.handle_key_event(key(KeyCode::Down), &feed), None);
        }
        assert_eq!(list.viewport().last_visible(10), 7);
        assert_eq!(list.handle_key_event(key(KeyCode::Down), &feed), Some(Action::LoadNextPage));
        assert_eq!(list.handle_key_event(key(KeyCode::Down), &feed), None);

        let more = records(20);
        let grown = view(&more);
        assert_eq!(list.poll_near_end(&grown), None);
        assert_eq!(list.handle_key_event(key(KeyCode::End), &grown), Some(Action::LoadNextPage));
        assert_eq!(list.poll_near_end(&grown), None);
    }

    #[test]
    fn test_no_signal_while_loading() {
        let items = records(2);
        let mut list = list();
        let mut feed = view(&items);
        draw(&mut list, &feed, 12);

        feed.loading = true;
        assert_eq!(list.poll_near_end(&feed), None);

        feed.loading = false;
        assert_eq!(list.poll_near_end(&feed), Some(Action::LoadNextPage));
    }

    #[test]
    fn test_refresh_key_and_reset_scroll() {
        let items = records(30);
        let mut list = list();
        let feed = view(&items);
        draw(&mut list, &feed, 11);
        list.handle_key_event(key(KeyCode::PageDown), &feed);
        let selected = list.viewport().selected();
        assert!(selected > 0);

        // The key only asks for a refresh; the app decides whether to scroll back
        assert_eq!(list.handle_key_event(key(KeyCode::Char('r')), &feed), Some(Action::Refresh));
        assert_eq!(list.viewport().selected(), selected);

        list.reset_scroll();
        assert_eq!(list.viewport().selected(), 0);
        assert_eq!(list.viewport().offset(), 0);
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let items = records(30);
        let mut list = list();
        let feed = view(&items);
        draw(&mut list, &feed, 11);

        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 1,
            row: 1,
            modifiers: KeyModifiers::empty(),
        };
        list.handle_mouse_event(wheel, &feed);
        assert_eq!(list.viewport().selected(), 1);

        let outside = MouseEvent { row: 40, ..wheel };
        list.handle_mouse_event(outside, &feed);
        assert_eq!(list.viewport().selected(), 1);
    }
}
