//! View rendering dispatch.

pub mod entities;
pub mod helpers;
pub mod links;
pub mod properties;

use crate::keys::InputMode;
use crate::nav::View;
use crate::state::App;
use crate::theme::notification_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    match app.active_view {
        View::Entities => entities::render(f, app, layout[1]),
        View::Properties => properties::render(f, app, layout[1]),
        View::Links => links::render(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);

    if app.show_help {
        render_help(f, app, f.size());
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let titles: Vec<Line> = View::all()
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.active_view.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Linker | {}", app.config.api_base_url)),
        )
        .style(Style::default().fg(app.palette.text_dim))
        .highlight_style(
            Style::default()
                .fg(app.palette.primary)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = match app.mode {
        InputMode::Filter => "type to filter • Enter keep • Esc clear • Ctrl-u erase",
        InputMode::Normal => match app.active_view {
            View::Links => "j/k move • Space select • l link • d delete • / search • ? help • q quit",
            _ => "j/k move • Space select • a add • d delete • / search • ? help • q quit",
        },
    };
    let (text, style) = match app.latest_notification() {
        Some(note) => (
            format!("{}: {}", note.level.label(), note.message),
            Style::default().fg(notification_color(note.level, &app.palette)),
        ),
        None => (help.to_string(), Style::default().fg(app.palette.text_dim)),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_help(f: &mut Frame<'_>, app: &App, area: Rect) {
    let popup = helpers::centered(area, 60, 60);
    let lines = vec![
        Line::from("Tab / Shift-Tab / 1-3   switch view"),
        Line::from("j k / arrows            move cursor"),
        Line::from("Space / Enter           toggle selection"),
        Line::from("/                       edit search"),
        Line::from("Esc                     clear search"),
        Line::from("a                       add search text as a new row"),
        Line::from("d                       delete the selected row"),
        Line::from("l                       link selected entity and property"),
        Line::from("r / Ctrl-r              reload from the API"),
        Line::from("q / Ctrl-c              quit"),
    ];
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Keys")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.palette.border_focus)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, popup);
    f.render_widget(widget, popup);
}
