//! Property list view.

use crate::state::App;
use crate::views::helpers::render_named_list;
use ratatui::{layout::Rect, Frame};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    render_named_list(f, app, area, "Properties", &app.properties);
}
