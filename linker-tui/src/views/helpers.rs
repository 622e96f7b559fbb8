//! Layout and list rendering shared by the views.

use crate::keys::InputMode;
use crate::state::{App, ListState, NamedRow};
use crate::theme::{border_style, row_style};
use crate::widgets::{DetailPanel, FilterBar};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState as RowCursor},
    Frame,
};

/// Split a view body into search bar, list and detail column.
pub fn list_layout(area: Rect, left_percent: u16) -> (Rect, Rect, Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent),
        ])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[0]);
    (left[0], left[1], columns[1])
}

pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn render_filter(f: &mut Frame<'_>, app: &App, area: Rect, hint: Option<(&str, Style)>) {
    let bar = FilterBar {
        query: app.active_query(),
        editing: app.mode == InputMode::Filter,
        hint,
        text_style: Style::default().fg(app.palette.text),
        border_style: border_style(app.mode == InputMode::Filter, &app.palette),
    };
    bar.render(f, area);
}

/// Hint telling the user whether `a` adds the current query.
pub fn add_hint<T: NamedRow>(app: &App, list: &ListState<T>) -> Option<(String, Style)> {
    if list.query.is_empty() {
        return None;
    }
    Some(if list.can_add() {
        (
            format!("[a] add \"{}\"", list.query),
            Style::default().fg(app.palette.success),
        )
    } else {
        ("already exists".to_string(), Style::default().fg(app.palette.text_dim))
    })
}

/// Render an entity or property list with its search bar and detail panel.
pub fn render_named_list<T: NamedRow>(
    f: &mut Frame<'_>,
    app: &App,
    area: Rect,
    title: &str,
    list: &ListState<T>,
) {
    let (filter_area, list_area, detail_area) = list_layout(area, 60);

    let hint = add_hint(app, list);
    render_filter(
        f,
        app,
        filter_area,
        hint.as_ref().map(|(text, style)| (text.as_str(), *style)),
    );

    let visible = list.visible();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|item| {
            let selected = list.is_selected(item);
            let marker = if selected { "(*) " } else { "( ) " };
            ListItem::new(Line::from(format!("{}{}", marker, item.name())))
                .style(row_style(selected, false, &app.palette))
        })
        .collect();

    let heading = if list.loaded {
        format!("{} ({}/{})", title, visible.len(), list.items.len())
    } else {
        format!("{} (loading)", title)
    };
    let mut cursor = RowCursor::default();
    if !visible.is_empty() {
        cursor.select(Some(list.cursor));
    }
    let widget = List::new(items)
        .block(
            Block::default()
                .title(heading)
                .borders(Borders::ALL)
                .border_style(border_style(app.mode == InputMode::Normal, &app.palette)),
        )
        .highlight_style(Style::default().bg(app.palette.bg_highlight))
        .highlight_symbol("> ");
    f.render_stateful_widget(widget, list_area, &mut cursor);

    let mut fields = Vec::new();
    if let Some(item) = list.selected_item() {
        fields.push(("Name", item.name().to_string()));
        fields.push(("ID", item.row_id().to_string()));
    }
    let detail = DetailPanel {
        title: "Selected",
        fields,
        label_style: Style::default().fg(app.palette.secondary),
        border_style: border_style(false, &app.palette),
    };
    detail.render(f, detail_area);
}
