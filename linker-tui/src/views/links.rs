//! Named-link view and link composer.

use crate::keys::InputMode;
use crate::state::{is_highlighted, App};
use crate::theme::{border_style, row_style};
use crate::views::helpers::{list_layout, render_filter};
use crate::widgets::DetailPanel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState as RowCursor},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (filter_area, list_area, side_area) = list_layout(area, 65);
    render_filter(f, app, filter_area, None);

    let entity = app.selected_entity();
    let property = app.selected_property();
    let visible = app.links.visible();

    let items: Vec<ListItem> = visible
        .iter()
        .map(|link| {
            let selected = app.links.is_selected(link);
            let marker = if selected { "(*) " } else { "( ) " };
            ListItem::new(Line::from(format!(
                "{}{}  ->  {}",
                marker, link.entity_name, link.property_name
            )))
            .style(row_style(
                selected,
                is_highlighted(link, entity, property),
                &app.palette,
            ))
        })
        .collect();

    let heading = if app.links.loaded {
        format!("Links ({}/{})", visible.len(), app.links.items.len())
    } else {
        "Links (loading)".to_string()
    };
    let mut cursor = RowCursor::default();
    if !visible.is_empty() {
        cursor.select(Some(app.links.cursor));
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

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(side_area);

    let status = if app.can_create_link() {
        "ready: press l".to_string()
    } else if entity.is_none() || property.is_none() {
        "select an entity and a property".to_string()
    } else {
        "already linked".to_string()
    };
    let composer = DetailPanel {
        title: "New link",
        fields: vec![
            ("Entity", entity.map(|e| e.name.clone()).unwrap_or_else(|| "-".to_string())),
            ("Property", property.map(|p| p.name.clone()).unwrap_or_else(|| "-".to_string())),
            ("Status", status),
        ],
        label_style: Style::default().fg(app.palette.secondary),
        border_style: border_style(app.can_create_link(), &app.palette),
    };
    composer.render(f, side[0]);

    let mut fields = Vec::new();
    if let Some(link) = app.links.selected_item() {
        fields.push(("Link ID", link.id.to_string()));
        fields.push(("Entity", format!("{} ({})", link.entity_name, link.entity_id)));
        fields.push(("Property", format!("{} ({})", link.property_name, link.property_id)));
    }
    let detail = DetailPanel {
        title: "Selected",
        fields,
        label_style: Style::default().fg(app.palette.secondary),
        border_style: border_style(false, &app.palette),
    };
    detail.render(f, side[1]);
}
