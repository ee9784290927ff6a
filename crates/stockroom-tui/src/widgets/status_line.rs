//! Status line — the bottom row: last error, else current location.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusLine<'a> {
    location: Option<&'a str>,
    error: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(location: Option<&'a str>, error: Option<&'a str>, theme: &'a Theme) -> Self {
        Self { location, error, theme }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match (self.error, self.location) {
            (Some(err), _) => Line::from(Span::styled(format!(" ✗ {err}"), self.theme.status_error)),
            (None, Some(loc)) => Line::from(vec![
                Span::styled(" location ", Style::default().add_modifier(Modifier::DIM)),
                Span::styled(loc.to_string(), self.theme.status_location),
            ]),
            (None, None) => Line::from(Span::styled(
                " / search   Enter open   : command",
                Style::default().add_modifier(Modifier::DIM),
            )),
        };
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
