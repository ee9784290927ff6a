//! Gallery widgets — the thumbnail list on the left and the current-image pane
//! on the right.
//!
//! Picking a thumbnail (`Enter` or a click) hands its relative path to the
//! [`ImageSwapper`]; the image pane then shows the resolved source. The
//! terminal cannot draw the picture, so the pane shows where it would load
//! from.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::result_list::contains;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use stockroom_core::ImageSwapper;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ThumbnailListState {
    /// Paths relative to the gallery base path.
    pub images: Vec<String>,
    pub cursor: usize,
    pub(crate) last_area: Cell<Rect>,
    /// First visible index from the last render.
    pub(crate) last_offset: Cell<usize>,
}

impl ThumbnailListState {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, ..Self::default() }
    }

    pub fn selected(&self) -> Option<&str> {
        self.images.get(self.cursor).map(String::as_str)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < self.images.len() {
                    self.cursor += 1;
                }
            }
            _ => {}
        }
    }

    /// Index of the thumbnail drawn at `(column, row)`, if any.
    pub fn index_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = Block::bordered().inner(self.last_area.get());
        if !contains(inner, column, row) {
            return None;
        }
        let idx = self.last_offset.get() + (row - inner.y) as usize;
        (idx < self.images.len()).then_some(idx)
    }
}

/// Gallery tab state: thumbnails plus the swapper they drive.
#[derive(Debug)]
pub struct GalleryState {
    pub thumbnails: ThumbnailListState,
    pub swapper: ImageSwapper,
}

impl GalleryState {
    /// Pick the thumbnail under the cursor.
    pub fn pick_selected(&mut self) -> Option<String> {
        let relative = self.thumbnails.selected()?.to_string();
        Some(self.swapper.pick(&relative).to_string())
    }
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

pub struct ThumbnailList<'a> {
    state: &'a ThumbnailListState,
    /// Currently shown source, to mark the active thumbnail.
    current: Option<&'a str>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ThumbnailList<'a> {
    pub fn new(
        state: &'a ThumbnailListState,
        current: Option<&'a str>,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, current, focused, theme }
    }
}

impl Widget for ThumbnailList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered().title(" Thumbnails ").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = (inner.height as usize).max(1);
        let offset = (self.state.cursor + 1).saturating_sub(height);
        self.state.last_area.set(area);
        self.state.last_offset.set(offset);

        let lines: Vec<Line> = self
            .state
            .images
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, rel)| {
                let shown = self.current.is_some_and(|src| src.ends_with(rel.as_str()));
                let marker = if shown { "● " } else { "  " };
                let line = Line::from(vec![Span::raw(marker), Span::raw(rel.clone())]);
                if self.focused && i == self.state.cursor {
                    line.patch_style(self.theme.row_selected)
                } else {
                    line
                }
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

pub struct ImagePane<'a> {
    swapper: &'a ImageSwapper,
    theme: &'a Theme,
}

impl<'a> ImagePane<'a> {
    pub fn new(swapper: &'a ImageSwapper, theme: &'a Theme) -> Self {
        Self { swapper, theme }
    }
}

impl Widget for ImagePane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(" {} ", self.swapper.selector()))
            .border_style(self.theme.border_unfocused);

        let dim = Style::default().add_modifier(Modifier::DIM);
        let lines = match self.swapper.current_source() {
            Some(src) => vec![
                Line::from(vec![Span::styled("src ", dim), Span::raw(src.to_string())]),
            ],
            None => vec![Line::from(Span::styled(
                "pick a thumbnail to display it here",
                dim,
            ))],
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
