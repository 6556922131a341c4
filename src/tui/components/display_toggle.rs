//! Header switch that hides or shows the body line of every row.

use super::{Action, Component, ComponentState, FeedView};
use crate::tui::{keys::KeyBinding, styles::Theme, Frame};
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct DisplayToggle {
    state: ComponentState,
    binding: KeyBinding,
}

impl DisplayToggle {
    pub fn new(binding: KeyBinding) -> Self {
        Self {
            state: ComponentState::new(),
            binding,
        }
    }

    fn switch_label(on: bool) -> &'static str {
        if on {
            " ON  "
        } else {
            " OFF "
        }
    }
}

impl Component for DisplayToggle {
    fn handle_key_event(&mut self, event: KeyEvent, _view: &FeedView<'_>) -> Option<Action> {
        self.binding.matches(&event).then_some(Action::ToggleDisplay)
    }

    fn handle_mouse_event(&mut self, event: MouseEvent, _view: &FeedView<'_>) -> Option<Action> {
        let clicked = event.kind == MouseEventKind::Down(MouseButton::Left);
        (clicked && self.state.contains(event.column, event.row)).then_some(Action::ToggleDisplay)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, view: &FeedView<'_>) {
        self.state.size = area;

        let on = view.mode.hide_body();
        let line = Line::from(vec![
            Span::styled("Change display: ", theme.text_style()),
            Span::styled(Self::switch_label(on), theme.switch_style(on)),
        ]);

        let header = Paragraph::new(line).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(theme.border_style()),
        );
        frame.render_widget(header, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::DisplayMode;
    use crate::tui::components::test_support::{buffer_text, view};
    use crate::tui::keys::KeyMap;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn toggle() -> DisplayToggle {
        DisplayToggle::new(KeyMap::default().toggle_display)
    }

    #[test]
    fn test_toggle_key() {
        let mut toggle = toggle();
        let view = view(&[]);

        let t = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE);
        assert_eq!(toggle.handle_key_event(t, &view), Some(Action::ToggleDisplay));

        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(toggle.handle_key_event(x, &view), None);
    }

    #[test]
    fn test_renders_switch_state_and_handles_clicks() {
        let mut terminal = Terminal::new(TestBackend::new(40, 2)).unwrap();
        let mut toggle = toggle();
        let theme = Theme::default();
        let mut view = view(&[]);
        view.mode = DisplayMode::new(true);

        terminal
            .draw(|frame| {
                let area = frame.size();
                toggle.render(frame, area, &theme, &view);
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Change display:"));
        assert!(text.contains("ON"));

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 0,
            modifiers: KeyModifiers::empty(),
        };
        assert_eq!(toggle.handle_mouse_event(click, &view), Some(Action::ToggleDisplay));

        let outside = MouseEvent { row: 5, ..click };
        assert_eq!(toggle.handle_mouse_event(outside, &view), None);
    }
}
