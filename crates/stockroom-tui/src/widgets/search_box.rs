//! Search box widget — single-line text input above a dataset's result list.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! [`SearchBoxState::handle`] reports whether the text changed so the app
//! shell knows when to re-run the search.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBoxState {
    /// Raw text as typed; the search lowercases it.
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
    /// Area of the last render, for mouse hit-testing.
    pub(crate) last_area: Cell<Rect>,
}

impl SearchBoxState {
    /// Handle a key event. Returns `true` when `query` changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, cursor = self.cursor, "search: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.prev_boundary();
                self.query.remove(prev);
                self.cursor = prev;
                tracing::debug!(query = %self.query, cursor = self.cursor, "search: backspace");
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.query.len() {
                    self.cursor = self.query[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.query.len());
                }
                false
            }
            _ => false,
        }
    }

    /// Empty the box. Returns `true` when there was text to clear.
    pub fn clear(&mut self) -> bool {
        let had_text = !self.query.is_empty();
        self.query.clear();
        self.cursor = 0;
        had_text
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchBox<'a> {
    state: &'a SearchBoxState,
    /// Element id shown as the box title.
    input_id: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBox<'a> {
    pub fn new(state: &'a SearchBoxState, input_id: &'a str, focused: bool, theme: &'a Theme) -> Self {
        Self { state, input_id, focused, theme }
    }

    /// Absolute terminal position of the text cursor within `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = self.state.query[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for SearchBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.state.last_area.set(area);

        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered()
            .title(format!(" #{} ", self.input_id))
            .border_style(border_style);

        let line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(line).block(block).render(area, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> SearchBoxState {
        let mut s = SearchBoxState::default();
        for c in text.chars() {
            assert!(s.handle(&AppEvent::Char(c)));
        }
        s
    }

    #[test]
    fn typing_and_backspace() {
        let mut s = typed("asp");
        assert_eq!(s.query, "asp");
        assert_eq!(s.cursor, 3);
        assert!(s.handle(&AppEvent::Backspace));
        assert_eq!(s.query, "as");
    }

    #[test]
    fn backspace_at_start_is_not_a_change() {
        let mut s = SearchBoxState::default();
        assert!(!s.handle(&AppEvent::Backspace));
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut s = typed("né");
        s.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(s.cursor, 1);
        s.handle(&AppEvent::Char('x'));
        assert_eq!(s.query, "nxé");
        s.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(s.cursor, s.query.len());
    }

    #[test]
    fn clear_reports_change() {
        let mut s = typed("a");
        assert!(s.clear());
        assert!(!s.clear());
        assert_eq!(s.cursor, 0);
    }
}
