use crate::error::ValidationError;
use crate::models::{Item, ItemId};
use crate::storage::{KeyValueStore, PersistentStore};

/// Authoritative list of items, kept in insertion order and mirrored to the
/// persistent store after every mutation.
#[derive(Clone, Debug)]
pub struct ItemRegistry<S> {
    items: Vec<Item>,
    /// `None` once every id has been handed out.
    next_id: Option<ItemId>,
    store: PersistentStore<S>,
}

impl<S: KeyValueStore> ItemRegistry<S> {
    /// Loads the persisted list. The id counter resumes past the largest
    /// stored id.
    pub fn load(store: PersistentStore<S>) -> Self {
        let items = store.load_items();
        let next_id = items
            .iter()
            .map(|i| i.id)
            .max()
            .map_or(Some(ItemId(1)), ItemId::next);

        Self {
            items,
            next_id,
            store,
        }
    }

    pub fn list_all(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Case-sensitive exact match.
    pub fn exists(&self, text: &str) -> bool {
        self.items.iter().any(|i| i.text == text)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, text: &str) -> Result<Item, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        if self.exists(text) {
            return Err(ValidationError::Duplicate(text.to_string()));
        }

        let Some(id) = self.next_id else {
            tracing::warn!("item id counter exhausted");
            return Err(ValidationError::IdsExhausted);
        };

        let item = Item::new(id, text);
        self.next_id = id.next();
        self.items.push(item.clone());
        self.store.save_items(&self.items);

        tracing::info!(id = %item.id, "item added");
        Ok(item)
    }

    /// Replaces the text of `id`.
    ///
    /// Unlike `add`, no duplicate check is made: an edit may produce text
    /// that another item already has.
    pub fn update(&mut self, id: ItemId, text: &str) -> Option<Item> {
        let item = self.items.iter_mut().find(|i| i.id == id)?;
        item.text = text.to_string();
        let updated = item.clone();
        self.store.save_items(&self.items);

        tracing::info!(id = %id, "item updated");
        Some(updated)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        let removed = self.items.remove(pos);
        self.store.save_items(&self.items);

        tracing::info!(id = %id, "item removed");
        Some(removed)
    }

    /// Empties the list and erases it from storage. The id counter keeps
    /// counting.
    pub fn clear(&mut self) {
        self.items.clear();
        self.store.clear_items();
        tracing::info!("items cleared");
    }
}
