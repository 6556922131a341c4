use super::Record;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Whether rows show their body line. Never touches pagination state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayMode {
    hide_body: bool,
}

impl DisplayMode {
    #[cfg(test)]
    pub fn new(hide_body: bool) -> Self {
        Self { hide_body }
    }

    pub fn hide_body(&self) -> bool {
        self.hide_body
    }

    pub fn toggle(&mut self) -> bool {
        self.hide_body = !self.hide_body;
        self.hide_body
    }

    /// Terminal lines one rendered record occupies, separator included
    pub fn item_height(&self) -> u16 {
        if self.hide_body {
            2
        } else {
            3
        }
    }
}

/// Render instruction for one row: title always, body only when shown
pub fn render_item(record: &Record, mode: DisplayMode) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        record.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    if !mode.hide_body() {
        lines.push(Line::from(Span::styled(
            record.body.clone(),
            Style::default().fg(Color::Gray),
        )));
    }

    lines.push(Line::default());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line<'static>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_body_shown_by_default() {
        let record = Record::new("item-1", "User 1", "LastMessage.");
        let lines = render_item(&record, DisplayMode::default());

        assert_eq!(text(&lines), vec!["User 1", "LastMessage.", ""]);
        assert_eq!(lines.len() as u16, DisplayMode::default().item_height());
    }

    #[test]
    fn test_hidden_body() {
        let record = Record::new("item-1", "User 1", "LastMessage.");
        let mut mode = DisplayMode::default();
        assert!(mode.toggle());

        let lines = render_item(&record, mode);
        assert_eq!(text(&lines), vec!["User 1", ""]);
        assert_eq!(lines.len() as u16, mode.item_height());

        assert!(!mode.toggle());
    }
}
