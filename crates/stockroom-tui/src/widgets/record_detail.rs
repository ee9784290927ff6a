//! Record detail popup — shown after navigating to a row's target.
//!
//! Lists every field of the record, not just the searched ones. Close with
//! `Escape`.

use crate::theme::Theme;
use crate::widgets::help::centered_rect;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};
use stockroom_core::{record::display_value, Record};

/// The location most recently navigated to, with the record it names.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub location: String,
    /// `None` when the target id no longer resolves to a record.
    pub record: Option<Record>,
}

pub struct RecordDetail<'a> {
    view: &'a DetailView,
    theme: &'a Theme,
}

impl<'a> RecordDetail<'a> {
    pub fn new(view: &'a DetailView, theme: &'a Theme) -> Self {
        Self { view, theme }
    }
}

impl Widget for RecordDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.view.record.as_ref().map_or(1, Record::len) as u16;
        let popup = centered_rect(70, rows + 2, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(format!(" {} (Esc to close) ", self.view.location))
            .border_style(self.theme.border_focused);

        let lines: Vec<Line> = match &self.view.record {
            Some(record) => {
                let width = record.fields().map(|(k, _)| k.len()).max().unwrap_or(0);
                record
                    .fields()
                    .map(|(field, value)| {
                        Line::from(vec![
                            Span::styled(
                                format!("{field:<width$}  "),
                                Style::default().add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(display_value(value), self.theme.field_style(field)),
                        ])
                    })
                    .collect()
            }
            None => vec![Line::from(Span::styled(
                "no record at this location",
                self.theme.status_error,
            ))],
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}
