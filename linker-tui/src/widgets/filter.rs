//! Search box shown above each list.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct FilterBar<'a> {
    pub query: &'a str,
    /// True while keystrokes go to the query.
    pub editing: bool,
    /// Right-hand hint, e.g. whether `a` would add the query as a new row.
    pub hint: Option<(&'a str, Style)>,
    pub text_style: Style,
    pub border_style: Style,
}

impl<'a> FilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled("Search: ", self.border_style),
            Span::styled(self.query.to_string(), self.text_style),
        ];
        if self.editing {
            spans.push(Span::styled("_", self.text_style));
        }
        if let Some((hint, style)) = self.hint {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(hint.to_string(), style));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );
        f.render_widget(paragraph, area);
    }
}
