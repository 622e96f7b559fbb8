//! Linker TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use linker_tui::api_client::RestClient;
use linker_tui::config::TuiConfig;
use linker_tui::error::TuiError;
use linker_tui::events::TuiEvent;
use linker_tui::keys::{map_key, Action, InputMode};
use linker_tui::nav::View;
use linker_tui::notifications::NotificationLevel;
use linker_tui::state::{App, DeleteTarget};
use linker_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    let api = RestClient::new(&config)?;
    let mut app = App::new(config);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    refresh_all(&mut app, &api).await;

    let tick_rate = Duration::from_millis(app.config.refresh_interval_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                app.prune_notifications(chrono::Utc::now());
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, &api, event).await? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            let sent = match event::read() {
                Ok(CrosstermEvent::Key(key)) => sender.blocking_send(TuiEvent::Input(key)),
                Ok(CrosstermEvent::Resize(width, height)) => {
                    sender.blocking_send(TuiEvent::Resize { width, height })
                }
                _ => Ok(()),
            };
            // Receiver gone: the UI has exited.
            if sent.is_err() {
                break;
            }
        }
    });
}

async fn handle_event(app: &mut App, api: &RestClient, event: TuiEvent) -> Result<bool, TuiError> {
    match event {
        TuiEvent::Input(key) => {
            if let Some(action) = map_key(app.mode, key) {
                return handle_action(app, api, action).await;
            }
        }
        TuiEvent::Resize { .. } => {}
    }
    Ok(false)
}

async fn handle_action(app: &mut App, api: &RestClient, action: Action) -> Result<bool, TuiError> {
    if app.show_help && action != Action::Quit {
        app.show_help = false;
        return Ok(false);
    }

    match action {
        Action::Quit => return Ok(true),
        Action::NextView => app.active_view = app.active_view.next(),
        Action::PrevView => app.active_view = app.active_view.previous(),
        Action::SwitchView(index) => {
            if let Some(view) = View::from_index(index) {
                app.active_view = view;
            }
        }
        Action::MoveDown => app.cursor_down(),
        Action::MoveUp => app.cursor_up(),
        Action::Select => app.toggle_at_cursor(),
        Action::OpenHelp => app.show_help = true,
        Action::OpenFilter => app.mode = InputMode::Filter,
        Action::ClearFilter => app.clear_query(),
        Action::Input(c) => app.push_query(c),
        Action::Backspace => app.pop_query(),
        Action::Confirm => app.mode = InputMode::Normal,
        Action::Cancel => {
            app.clear_query();
            app.mode = InputMode::Normal;
        }
        Action::Add => add_from_query(app, api).await,
        Action::Delete => delete_selected(app, api).await,
        Action::CreateLink => create_link(app, api).await,
        Action::Refresh => refresh_all(app, api).await,
    }
    Ok(false)
}

/// Fetch all three lists. Each failure is reported and leaves that list as
/// it was.
async fn refresh_all(app: &mut App, api: &RestClient) {
    match api.list_entities().await {
        Ok(rows) => app.entities.set_items(rows),
        Err(err) => app.notify(NotificationLevel::Error, format!("Loading entities failed: {}", err)),
    }
    match api.list_properties().await {
        Ok(rows) => app.properties.set_items(rows),
        Err(err) => app.notify(
            NotificationLevel::Error,
            format!("Loading properties failed: {}", err),
        ),
    }
    match api.list_named_links().await {
        Ok(rows) => app.links.set_items(rows),
        Err(err) => app.notify(NotificationLevel::Error, format!("Loading links failed: {}", err)),
    }
}

async fn add_from_query(app: &mut App, api: &RestClient) {
    match app.active_view {
        View::Entities => {
            let Some(name) = app.entities.pending_name().map(str::to_string) else {
                return;
            };
            match api.create_entity(&name).await {
                Ok(entity) => {
                    app.entities.apply_added(entity);
                    app.notify(NotificationLevel::Success, format!("Entity '{}' added", name));
                }
                Err(err) => app.notify(NotificationLevel::Error, format!("Add failed: {}", err)),
            }
        }
        View::Properties => {
            let Some(name) = app.properties.pending_name().map(str::to_string) else {
                return;
            };
            match api.create_property(&name).await {
                Ok(property) => {
                    app.properties.apply_added(property);
                    app.notify(NotificationLevel::Success, format!("Property '{}' added", name));
                }
                Err(err) => app.notify(NotificationLevel::Error, format!("Add failed: {}", err)),
            }
        }
        View::Links => app.notify(
            NotificationLevel::Info,
            "Select an entity and a property, then press l",
        ),
    }
}

async fn delete_selected(app: &mut App, api: &RestClient) {
    let Some(target) = app.delete_target() else {
        app.notify(NotificationLevel::Info, "Nothing selected");
        return;
    };

    let result = match &target {
        DeleteTarget::Entity(entity) => api
            .delete_entity(entity.id, Some(&entity.name))
            .await
            .map(|_| ()),
        DeleteTarget::Property(property) => api
            .delete_property(property.id, Some(&property.name))
            .await
            .map(|_| ()),
        DeleteTarget::Link(link) => api.delete_link(link.id).await.map(|_| ()),
    };

    match result {
        Ok(()) => {
            app.apply_deleted(&target);
            app.notify(NotificationLevel::Success, "Deleted");
        }
        Err(err) => app.notify(NotificationLevel::Error, format!("Delete failed: {}", err)),
    }
}

async fn create_link(app: &mut App, api: &RestClient) {
    if !app.can_create_link() {
        app.notify(
            NotificationLevel::Warning,
            "Select an entity and a property that are not linked yet",
        );
        return;
    }
    let (Some(entity), Some(property)) =
        (app.selected_entity().cloned(), app.selected_property().cloned())
    else {
        return;
    };

    match api.create_link(entity.id, property.id).await {
        Ok(link) => {
            if app.links.apply_created(&link, &entity, &property).is_some() {
                app.notify(
                    NotificationLevel::Success,
                    format!("Linked {} -> {}", entity.name, property.name),
                );
            } else {
                app.notify(NotificationLevel::Warning, "Server returned a different link");
            }
        }
        Err(err) => app.notify(NotificationLevel::Error, format!("Link failed: {}", err)),
    }
}
