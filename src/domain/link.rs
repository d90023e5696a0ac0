/// A clickable spot recorded while a screen is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPos {
    pub x: u16,
    pub y: u16,
    pub url: String,
}

impl LinkPos {
    pub fn new(x: u16, y: u16, url: impl Into<String>) -> Self {
        Self {
            x,
            y,
            url: url.into(),
        }
    }
}

/// Link positions of the current screen and the cursor over them.
///
/// The cursor is `None` when nothing is selected and otherwise always
/// indexes into `positions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPositionState {
    cursor: Option<usize>,
    positions: Vec<LinkPos>,
}

impl LinkPositionState {
    pub fn clear(&mut self) {
        self.cursor = None;
        self.positions.clear();
    }

    /// Replace all positions and select the first one, if any.
    pub fn reset(&mut self, positions: Vec<LinkPos>) {
        self.positions = positions;
        self.cursor = if self.positions.is_empty() { None } else { Some(0) };
    }

    pub fn positions(&self) -> &[LinkPos] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Cursor as a signed index, `-1` when nothing is selected.
    pub fn cursor_index(&self) -> isize {
        self.cursor.map_or(-1, |i| i as isize)
    }

    pub fn selected(&self) -> Option<&LinkPos> {
        self.cursor.and_then(|i| self.positions.get(i))
    }

    pub fn url(&self) -> Option<&str> {
        self.selected().map(|p| p.url.as_str())
    }

    /// Move forward, holding at the last position.
    pub fn next_pos(&mut self) {
        if self.positions.is_empty() {
            self.cursor = None;
            return;
        }
        let last = self.positions.len() - 1;
        self.cursor = Some(self.cursor.map_or(0, |i| (i + 1).min(last)));
    }

    /// Move backward, holding at the first position.
    pub fn prev_pos(&mut self) {
        if self.positions.is_empty() {
            self.cursor = None;
            return;
        }
        self.cursor = Some(self.cursor.map_or(0, |i| i.saturating_sub(1)));
    }
}
