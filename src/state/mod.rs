use crate::config::AppConfig;
use crate::drag::{self, DragOutcome, DragSource, RowRect};
use crate::error::ValidationError;
use crate::models::{Item, ItemId};
use crate::registry::ItemRegistry;
use crate::session::{EditTarget, Session, SubmitMode};
use crate::storage::{BrowserStore, KeyValueStore, PersistentStore};
use crate::view::ListView;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(Item),
    Updated(Item),
    /// The edited item disappeared before the submit; nothing changed.
    Stale(ItemId),
}

/// Keeps the registry, the rendered rows, the session and the stored order
/// consistent with each other.
#[derive(Clone, Debug)]
pub struct ListController<S> {
    registry: ItemRegistry<S>,
    store: PersistentStore<S>,
    view: ListView,
    session: Session,
}

impl<S: KeyValueStore + Clone> ListController<S> {
    /// Renders the stored items and applies the stored order.
    pub fn load(store: PersistentStore<S>) -> Self {
        let registry = ItemRegistry::load(store.clone());
        let mut view = ListView::new();
        view.render(registry.list_all());
        if let Some(order) = store.load_order() {
            view.restore_order(&order);
        }

        tracing::info!(items = registry.len(), "list loaded");
        Self {
            registry,
            store,
            view,
            session: Session::default(),
        }
    }

    pub fn items(&self) -> &[Item] {
        self.registry.list_all()
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &PersistentStore<S> {
        &self.store
    }

    pub fn submit_mode(&self) -> SubmitMode {
        self.session.submit_mode()
    }

    pub fn is_touch_dragging(&self) -> bool {
        self.session
            .drag()
            .is_some_and(|g| g.source == DragSource::Touch)
    }

    /// Adds `raw`, or applies it to the row under edit.
    pub fn submit(&mut self, raw: &str) -> Result<SubmitOutcome, ValidationError> {
        let text = raw.trim();
        if text.is_empty() {
            tracing::warn!("empty submit rejected");
            return Err(ValidationError::EmptyInput);
        }

        if let Some(target) = self.session.take_edit() {
            self.view.clear_highlight();
            return Ok(self.apply_edit(target, text));
        }

        let item = self.registry.add(text).inspect_err(|e| {
            tracing::warn!(error = %e, "add rejected");
        })?;
        self.view.render_row(&item);
        if let Some(mut order) = self.store.load_order() {
            order.push(item.id);
            self.store.save_order(&order);
        }
        Ok(SubmitOutcome::Added(item))
    }

    fn apply_edit(&mut self, target: EditTarget, text: &str) -> SubmitOutcome {
        let Some(item) = self.registry.update(target.id, text) else {
            tracing::warn!(id = %target.id, "edited item no longer exists");
            return SubmitOutcome::Stale(target.id);
        };
        if let Err(e) = self.view.patch_row_text(target.row, text) {
            tracing::warn!(error = %e, "edited row missing, rebuilding");
            self.rebuild();
        }
        SubmitOutcome::Updated(item)
    }

    /// Starts (or retargets) editing `id`. Returns the text to load into
    /// the input.
    pub fn select_row(&mut self, id: ItemId) -> Option<String> {
        let row = self.view.handle_of(id)?;
        let text = self.view.text_of(id)?.to_string();
        if !self.session.begin_edit(EditTarget { id, row }) {
            return None;
        }
        if let Err(e) = self.view.highlight_for_edit(row) {
            tracing::warn!(error = %e, "could not highlight row");
        }
        Some(text)
    }

    pub fn cancel_edit(&mut self) {
        if self.session.take_edit().is_some() {
            self.view.clear_highlight();
        }
    }

    /// Removes `id`. Removing the row under edit ends the edit.
    pub fn remove(&mut self, id: ItemId) -> bool {
        if self.registry.remove(id).is_none() {
            return false;
        }
        if let Some(row) = self.view.handle_of(id) {
            if let Err(e) = self.view.remove_row(row) {
                tracing::warn!(error = %e, "row already gone");
            }
        }
        if self.session.editing().is_some_and(|t| t.id == id) {
            self.cancel_edit();
        }
        if let Some(mut order) = self.store.load_order() {
            if order.remove(id) {
                self.store.save_order(&order);
            }
        }
        true
    }

    pub fn filter(&mut self, query: &str) {
        self.view.apply_filter(query);
    }

    /// Clears items and order, then re-renders from the persisted state.
    pub fn clear_all(&mut self) {
        self.registry.clear();
        self.store.clear_order();
        self.session.reset();
        self.view.apply_filter("");
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.view.render(self.registry.list_all());
        if let Some(order) = self.store.load_order() {
            self.view.restore_order(&order);
        }
    }

    /// Picks up `id`. An edit in progress is abandoned.
    pub fn start_drag(&mut self, id: ItemId, source: DragSource) -> bool {
        let was_editing = self.session.editing().is_some();
        let started = drag::start(&mut self.session, &self.view, id, source);
        if started && was_editing {
            self.view.clear_highlight();
        }
        started
    }

    pub fn conceal_dragged(&mut self) -> bool {
        drag::conceal(&self.session, &mut self.view)
    }

    pub fn hover(&mut self, target: ItemId, rect: RowRect, y: f64) -> bool {
        drag::hover(&self.session, &mut self.view, target, rect, y)
    }

    pub fn drop_dragged(&mut self) -> bool {
        drag::drop(&mut self.session, &mut self.view)
    }

    pub fn end_drag(&mut self) -> DragOutcome {
        let outcome = drag::end(&mut self.session, &mut self.view);
        self.commit(&outcome);
        outcome
    }

    pub fn touch_end(&mut self) -> DragOutcome {
        let outcome = drag::touch_end(&mut self.session, &mut self.view);
        self.commit(&outcome);
        outcome
    }

    fn commit(&self, outcome: &DragOutcome) {
        if let DragOutcome::Reordered(order) = outcome {
            self.store.save_order(order);
            tracing::info!(rows = order.len(), "list order saved");
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub list: RwSignal<ListController<BrowserStore>>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let store = PersistentStore::from_config(BrowserStore, config);
        Self {
            list: RwSignal::new(ListController::load(store)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AppConfig::from_window())
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
