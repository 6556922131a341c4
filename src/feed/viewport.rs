//! Scroll position bookkeeping and near-end detection for the feed list.

/// Fires when the rows left below the viewport drop under a fraction of
/// the viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearEnd {
    threshold: f32,
}

impl NearEnd {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// `last_visible` is the index of the last row on screen.
    pub fn reached(&self, last_visible: usize, loaded_len: usize, viewport_len: usize) -> bool {
        if loaded_len == 0 {
            return true;
        }
        let remaining = loaded_len.saturating_sub(last_visible + 1);
        let allowance = (self.threshold * viewport_len.max(1) as f32).floor() as usize;
        remaining <= allowance
    }
}

impl Default for NearEnd {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Cursor and scroll offset over a growing list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    selected: usize,
    height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            offset: 0,
            selected: 0,
            height,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Index of the last row inside the viewport, clamped to `len`
    pub fn last_visible(&self, len: usize) -> usize {
        (self.offset + self.height.max(1)).min(len).saturating_sub(1)
    }

    pub fn set_height(&mut self, height: usize, len: usize) {
        self.height = height;
        self.clamp(len);
    }

    pub fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        let target = if delta.is_negative() {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            self.selected.saturating_add(delta as usize)
        };
        self.selected = target.min(len - 1);
        self.clamp(len);
    }

    pub fn page_down(&mut self, len: usize) {
        self.move_by(self.height.max(1) as isize, len);
    }

    pub fn page_up(&mut self, len: usize) {
        self.move_by(-(self.height.max(1) as isize), len);
    }

    pub fn to_top(&mut self) {
        self.reset();
    }

    pub fn to_bottom(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
        self.clamp(len);
    }

    pub fn reset(&mut self) {
        self.offset = 0;
        self.selected = 0;
    }

    /// Keep the selection on screen and inside the list
    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        self.selected = self.selected.min(len - 1);
        let height = self.height.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_end_threshold() {
        let near_end = NearEnd::new(0.5);

        // 10 rows visible out of 30: 20 remain below
        assert!(!near_end.reached(9, 30, 10));
        // 5 remain, allowance is 5
        assert!(near_end.reached(24, 30, 10));
        assert!(!near_end.reached(23, 30, 10));
        assert!(near_end.reached(29, 30, 10));
    }

    #[test]
    fn test_near_end_on_empty_list() {
        assert!(NearEnd::default().reached(0, 0, 10));
    }

    #[test]
    fn test_short_list_is_near_end() {
        // Everything fits on screen
        assert!(NearEnd::new(0.1).reached(4, 5, 20));
    }

    #[test]
    fn test_viewport_follows_selection() {
        let mut viewport = Viewport::new(5);

        viewport.move_by(7, 20);
        assert_eq!(viewport.selected(), 7);
        assert_eq!(viewport.offset(), 3);
        assert_eq!(viewport.last_visible(20), 7);

        viewport.move_by(-6, 20);
        assert_eq!(viewport.selected(), 1);
        assert_eq!(viewport.offset(), 1);

        viewport.move_by(-10, 20);
        assert_eq!(viewport.selected(), 0);
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn test_viewport_clamps_to_list() {
        let mut viewport = Viewport::new(5);
        viewport.move_by(100, 12);
        assert_eq!(viewport.selected(), 11);
        assert_eq!(viewport.offset(), 7);

        viewport.to_top();
        viewport.page_down(12);
        assert_eq!(viewport.selected(), 5);
        viewport.to_bottom(12);
        assert_eq!(viewport.last_visible(12), 11);
    }

    #[test]
    fn test_viewport_resets_on_empty_list() {
        let mut viewport = Viewport::new(5);
        viewport.move_by(3, 10);
        viewport.move_by(1, 0);
        assert_eq!(viewport, Viewport::new(5));
    }
}
