use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub keys: Vec<(KeyCode, KeyModifiers)>,
    pub label: &'static str,
    pub description: &'static str,
}

impl KeyBinding {
    pub fn new(keys: &[(KeyCode, KeyModifiers)], label: &'static str, description: &'static str) -> Self {
        Self {
            keys: keys.to_vec(),
            label,
            description,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys
            .iter()
            .any(|(code, modifiers)| *code == event.code && *modifiers == event.modifiers)
    }
}

/// Application key mappings
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub toggle_display: KeyBinding,
    pub refresh: KeyBinding,
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub page_up: KeyBinding,
    pub page_down: KeyBinding,
    pub top: KeyBinding,
    pub bottom: KeyBinding,
}

const NONE: KeyModifiers = KeyModifiers::NONE;

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: KeyBinding::new(
                &[(KeyCode::Char('q'), NONE), (KeyCode::Char('c'), KeyModifiers::CONTROL)],
                "q",
                "Quit",
            ),
            help: KeyBinding::new(&[(KeyCode::Char('?'), NONE), (KeyCode::Char('?'), KeyModifiers::SHIFT)], "?", "Show/hide help"),
            toggle_display: KeyBinding::new(
                &[(KeyCode::Char('t'), NONE), (KeyCode::Char(' '), NONE)],
                "t",
                "Toggle message bodies",
            ),
            refresh: KeyBinding::new(&[(KeyCode::Char('r'), NONE)], "r", "Refresh from page 1"),
            up: KeyBinding::new(&[(KeyCode::Up, NONE), (KeyCode::Char('k'), NONE)], "↑/k", "Previous item"),
            down: KeyBinding::new(&[(KeyCode::Down, NONE), (KeyCode::Char('j'), NONE)], "↓/j", "Next item"),
            page_up: KeyBinding::new(&[(KeyCode::PageUp, NONE)], "PgUp", "Scroll up one screen"),
            page_down: KeyBinding::new(&[(KeyCode::PageDown, NONE)], "PgDn", "Scroll down one screen"),
            top: KeyBinding::new(&[(KeyCode::Home, NONE), (KeyCode::Char('g'), NONE)], "Home/g", "First item"),
            bottom: KeyBinding::new(
                &[
                    (KeyCode::End, NONE),
                    (KeyCode::Char('G'), NONE),
                    (KeyCode::Char('G'), KeyModifiers::SHIFT),
                ],
                "End/G",
                "Last loaded item",
            ),
        }
    }
}

impl KeyMap {
    /// Check if the event should quit the application
    pub fn should_quit(&self, event: &KeyEvent) -> bool {
        self.quit.matches(event)
    }

    /// Check if the event should show help
    pub fn should_show_help(&self, event: &KeyEvent) -> bool {
        self.help.matches(event)
    }

    pub fn bindings(&self) -> [&KeyBinding; 10] {
        [
            &self.down,
            &self.up,
            &self.page_down,
            &self.page_up,
            &self.top,
            &self.bottom,
            &self.toggle_display,
            &self.refresh,
            &self.help,
            &self.quit,
        ]
    }

    /// Get help text for all key bindings
    pub fn help_text(&self) -> String {
        self.bindings()
            .iter()
            .map(|binding| format!("{:<8} {}", binding.label, binding.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_bindings() {
        let keys = KeyMap::default();
        assert!(keys.should_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(keys.should_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!keys.should_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_help_text_lists_every_binding() {
        let keys = KeyMap::default();
        let help = keys.help_text();
        assert_eq!(help.lines().count(), 10);
        assert!(help.contains("Toggle message bodies"));
    }
}
