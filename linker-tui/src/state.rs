//! Application state and the list rules behind each view.
//!
//! Nothing here touches the terminal or the network: `main` performs the
//! requests and feeds the results back through the `apply_*` methods.

use crate::config::TuiConfig;
use crate::keys::InputMode;
use crate::nav::View;
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::Palette;
use chrono::{DateTime, Utc};
use linker_core::{Entity, Link, NamedLink, Property, RecordId};
use uuid::Uuid;

// ============================================================================
// ROW TRAITS
// ============================================================================

/// A row that can be selected by id.
pub trait CatalogRow {
    fn row_id(&self) -> Uuid;

    /// Whether the row is visible under `query`.
    fn matches(&self, query: &str) -> bool;
}

/// A row with a single user-chosen name.
pub trait NamedRow: CatalogRow {
    fn name(&self) -> &str;
}

/// Case-sensitive substring match; an empty query matches everything.
pub fn query_matches(text: &str, query: &str) -> bool {
    query.is_empty() || text.contains(query)
}

impl CatalogRow for Entity {
    fn row_id(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn matches(&self, query: &str) -> bool {
        query_matches(&self.name, query)
    }
}

impl NamedRow for Entity {
    fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogRow for Property {
    fn row_id(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn matches(&self, query: &str) -> bool {
        query_matches(&self.name, query)
    }
}

impl NamedRow for Property {
    fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogRow for NamedLink {
    fn row_id(&self) -> Uuid {
        self.id.as_uuid()
    }

    fn matches(&self, query: &str) -> bool {
        query_matches(&self.entity_name, query) || query_matches(&self.property_name, query)
    }
}

// ============================================================================
// LIST STATE
// ============================================================================

/// One filterable list with an optional single selection.
///
/// `cursor` indexes the *visible* rows; `selected` is an id so it survives
/// filtering.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub query: String,
    pub selected: Option<Uuid>,
    pub cursor: usize,
    pub loaded: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            selected: None,
            cursor: 0,
            loaded: false,
        }
    }
}

impl<T: CatalogRow> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows after a fetch. A selection whose row vanished is
    /// dropped.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.loaded = true;
        if let Some(id) = self.selected {
            if !self.contains(id) {
                self.selected = None;
            }
        }
        self.clamp_cursor();
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.items.iter().any(|item| item.row_id() == id)
    }

    pub fn visible(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| item.matches(&self.query))
            .collect()
    }

    pub fn selected_item(&self) -> Option<&T> {
        let id = self.selected?;
        self.items.iter().find(|item| item.row_id() == id)
    }

    /// The selected row, but only while the filter shows it.
    pub fn selected_visible(&self) -> Option<&T> {
        self.selected_item().filter(|item| item.matches(&self.query))
    }

    pub fn is_selected(&self, item: &T) -> bool {
        self.selected == Some(item.row_id())
    }

    /// Select `id`, or clear the selection if `id` is already selected.
    /// Unknown ids are ignored.
    pub fn toggle_selection(&mut self, id: Uuid) {
        if self.selected == Some(id) {
            self.selected = None;
        } else if self.contains(id) {
            self.selected = Some(id);
        }
    }

    pub fn cursor_item(&self) -> Option<&T> {
        self.visible().get(self.cursor).copied()
    }

    pub fn toggle_at_cursor(&mut self) {
        if let Some(id) = self.cursor_item().map(CatalogRow::row_id) {
            self.toggle_selection(id);
        }
    }

    pub fn cursor_down(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub fn cursor_up(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
        }
    }

    pub fn push_query(&mut self, c: char) {
        self.query.push(c);
        self.clamp_cursor();
    }

    pub fn pop_query(&mut self) {
        self.query.pop();
        self.clamp_cursor();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.clamp_cursor();
    }

    /// Remove a row after the server confirmed the delete.
    pub fn remove(&mut self, id: Uuid) -> Option<T> {
        let index = self.items.iter().position(|item| item.row_id() == id)?;
        let removed = self.items.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.clamp_cursor();
        Some(removed)
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}

impl<T: NamedRow> ListState<T> {
    /// "Add" is enabled when the query is non-empty and no row already
    /// carries exactly that name.
    pub fn can_add(&self) -> bool {
        !self.query.is_empty() && !self.items.iter().any(|item| item.name() == self.query)
    }

    /// The name an add would use, if adding is enabled.
    pub fn pending_name(&self) -> Option<&str> {
        self.can_add().then_some(self.query.as_str())
    }

    /// Append a freshly created row and clear the query.
    pub fn apply_added(&mut self, row: T) {
        self.items.push(row);
        self.clear_query();
    }
}

// ============================================================================
// LINK RULES
// ============================================================================

/// Whether `link` references the selected entity or the selected property.
pub fn is_highlighted(
    link: &NamedLink,
    entity: Option<&Entity>,
    property: Option<&Property>,
) -> bool {
    entity.is_some_and(|e| link.entity_id == e.id)
        || property.is_some_and(|p| link.property_id == p.id)
}

/// Create-link is enabled when both ends are selected and no existing link
/// joins them.
pub fn can_create_link(
    links: &[NamedLink],
    entity: Option<&Entity>,
    property: Option<&Property>,
) -> bool {
    match (entity, property) {
        (Some(entity), Some(property)) => !links
            .iter()
            .any(|l| l.entity_id == entity.id && l.property_id == property.id),
        _ => false,
    }
}

impl ListState<NamedLink> {
    /// Build the named link locally from the created row and the selected
    /// ends, then append it.
    pub fn apply_created(
        &mut self,
        link: &Link,
        entity: &Entity,
        property: &Property,
    ) -> Option<&NamedLink> {
        let named = NamedLink::compose(link, entity, property)?;
        self.items.push(named);
        self.items.last()
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// What a delete in the active view would remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Entity(Entity),
    Property(Property),
    Link(NamedLink),
}

/// Notifications kept for the footer.
pub const MAX_NOTIFICATIONS: usize = 16;

#[derive(Debug, Clone)]
pub struct App {
    pub config: TuiConfig,
    pub palette: Palette,
    pub active_view: View,
    pub mode: InputMode,
    pub entities: ListState<Entity>,
    pub properties: ListState<Property>,
    pub links: ListState<NamedLink>,
    pub notifications: Vec<Notification>,
    pub show_help: bool,
}

impl App {
    pub fn new(config: TuiConfig) -> Self {
        Self {
            config,
            palette: Palette::default(),
            active_view: View::Entities,
            mode: InputMode::Normal,
            entities: ListState::new(),
            properties: ListState::new(),
            links: ListState::new(),
            notifications: Vec::new(),
            show_help: false,
        }
    }

    /// Push a notification. An error stays only until the next
    /// notification replaces it.
    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.retain(|n| n.level != NotificationLevel::Error);
        if self.notifications.len() >= MAX_NOTIFICATIONS {
            let excess = self.notifications.len() + 1 - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
        self.notifications.push(Notification::new(level, message));
    }

    pub fn latest_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    /// Drop non-error notifications older than one refresh interval.
    pub fn prune_notifications(&mut self, now: DateTime<Utc>) {
        let ttl = chrono::Duration::milliseconds(
            i64::try_from(self.config.refresh_interval_ms).unwrap_or(i64::MAX),
        );
        self.notifications.retain(|n| !n.is_expired(now, ttl));
    }

    pub fn selected_entity(&self) -> Option<&Entity> {
        self.entities.selected_item()
    }

    pub fn selected_property(&self) -> Option<&Property> {
        self.properties.selected_item()
    }

    pub fn can_create_link(&self) -> bool {
        can_create_link(
            &self.links.items,
            self.selected_entity(),
            self.selected_property(),
        )
    }

    pub fn can_add(&self) -> bool {
        match self.active_view {
            View::Entities => self.entities.can_add(),
            View::Properties => self.properties.can_add(),
            View::Links => false,
        }
    }

    pub fn active_query(&self) -> &str {
        match self.active_view {
            View::Entities => &self.entities.query,
            View::Properties => &self.properties.query,
            View::Links => &self.links.query,
        }
    }

    /// Delete acts on the selected row only while it is visible.
    pub fn delete_target(&self) -> Option<DeleteTarget> {
        match self.active_view {
            View::Entities => self
                .entities
                .selected_visible()
                .cloned()
                .map(DeleteTarget::Entity),
            View::Properties => self
                .properties
                .selected_visible()
                .cloned()
                .map(DeleteTarget::Property),
            View::Links => self.links.selected_visible().cloned().map(DeleteTarget::Link),
        }
    }

    pub fn apply_deleted(&mut self, target: &DeleteTarget) {
        match target {
            DeleteTarget::Entity(entity) => {
                self.entities.remove(entity.row_id());
            }
            DeleteTarget::Property(property) => {
                self.properties.remove(property.row_id());
            }
            DeleteTarget::Link(link) => {
                self.links.remove(link.row_id());
            }
        }
    }

    pub fn cursor_down(&mut self) {
        match self.active_view {
            View::Entities => self.entities.cursor_down(),
            View::Properties => self.properties.cursor_down(),
            View::Links => self.links.cursor_down(),
        }
    }

    pub fn cursor_up(&mut self) {
        match self.active_view {
            View::Entities => self.entities.cursor_up(),
            View::Properties => self.properties.cursor_up(),
            View::Links => self.links.cursor_up(),
        }
    }

    pub fn toggle_at_cursor(&mut self) {
        match self.active_view {
            View::Entities => self.entities.toggle_at_cursor(),
            View::Properties => self.properties.toggle_at_cursor(),
            View::Links => self.links.toggle_at_cursor(),
        }
    }

    pub fn push_query(&mut self, c: char) {
        match self.active_view {
            View::Entities => self.entities.push_query(c),
            View::Properties => self.properties.push_query(c),
            View::Links => self.links.push_query(c),
        }
    }

    pub fn pop_query(&mut self) {
        match self.active_view {
            View::Entities => self.entities.pop_query(),
            View::Properties => self.properties.pop_query(),
            View::Links => self.links.pop_query(),
        }
    }

    pub fn clear_query(&mut self) {
        match self.active_view {
            View::Entities => self.entities.clear_query(),
            View::Properties => self.properties.clear_query(),
            View::Links => self.links.clear_query(),
        }
    }
}
