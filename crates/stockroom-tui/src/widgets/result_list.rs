//! Result list widget — the rendered rows of a dataset search.
//!
//! Rows come straight from [`stockroom_core::ResultList`]; the widget only
//! adds a cursor and highlights the query inside each label. A row is
//! activated with `Enter` or a left click, which the app shell turns into a
//! navigation to the row's target.

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
use stockroom_core::{ResultList, ResultRow};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ResultListState {
    pub list: ResultList,
    /// Index of the highlighted row.
    pub cursor: usize,
    pub(crate) last_area: Cell<Rect>,
}

impl ResultListState {
    pub fn new(list: ResultList) -> Self {
        Self {
            list,
            cursor: 0,
            last_area: Cell::new(Rect::default()),
        }
    }

    pub fn selected(&self) -> Option<&ResultRow> {
        self.list.rows().get(self.cursor)
    }

    /// Keep the cursor on a row after the list was re-rendered.
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.list.len().saturating_sub(1));
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < self.list.len() {
                    self.cursor += 1;
                }
            }
            _ => {}
        }
    }

    /// Index of the row drawn at the absolute cell `(column, row)`, if any.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = Block::bordered().inner(self.last_area.get());
        if !contains(inner, column, row) {
            return None;
        }
        let idx = (row - inner.y) as usize;
        (idx < self.list.len()).then_some(idx)
    }
}

pub(crate) fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultView<'a> {
    state: &'a ResultListState,
    /// Raw search text, highlighted inside each label.
    query: &'a str,
    focused: bool,
    bold_ids: bool,
    theme: &'a Theme,
}

impl<'a> ResultView<'a> {
    pub fn new(
        state: &'a ResultListState,
        query: &'a str,
        focused: bool,
        bold_ids: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, query, focused, bold_ids, theme }
    }
}

impl Widget for ResultView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.state.last_area.set(area);

        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered()
            .title(format!(" #{} ", self.state.list.id))
            .border_style(border_style);

        let lines: Vec<Line> = if self.state.list.is_empty() {
            vec![Line::from(Span::styled(
                "no matching records",
                Style::default().add_modifier(Modifier::DIM),
            ))]
        } else {
            self.state
                .list
                .rows()
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let line = self.render_row(row);
                    if self.focused && i == self.state.cursor {
                        line.patch_style(self.theme.row_selected)
                    } else {
                        line
                    }
                })
                .collect()
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

impl ResultView<'_> {
    fn render_row(&self, row: &ResultRow) -> Line<'static> {
        let id_style = if self.bold_ids {
            self.theme.row_id
        } else {
            Style::default()
        };
        let rest = row.label.strip_prefix(row.id.as_str()).unwrap_or(&row.label);

        let mut spans = vec![Span::styled(row.id.clone(), id_style)];
        spans.extend(highlight(rest, self.query, self.theme.search_highlight));
        Line::from(spans)
    }
}

/// Split `text` into spans, styling every case-insensitive occurrence of
/// `query` with `hl`. Falls back to a single plain span when lowercasing would
/// shift byte offsets.
fn highlight(text: &str, query: &str, hl: Style) -> Vec<Span<'static>> {
    let lower = text.to_lowercase();
    let needle = query.to_lowercase();
    if needle.is_empty() || lower.len() != text.len() {
        return vec![Span::raw(text.to_string())];
    }

    let mut spans = Vec::new();
    let mut pos = 0;
    for (start, m) in lower.match_indices(needle.as_str()) {
        if !text.is_char_boundary(start) || !text.is_char_boundary(start + m.len()) {
            continue;
        }
        if start > pos {
            spans.push(Span::raw(text[pos..start].to_string()));
        }
        spans.push(Span::styled(text[start..start + m.len()].to_string(), hl));
        pos = start + m.len();
    }
    if pos < text.len() {
        spans.push(Span::raw(text[pos..].to_string()));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
