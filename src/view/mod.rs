//! Visual projection of the registry: ordered rows plus the drag placeholder.
//!
//! Rows live in an arena addressed by [`RowHandle`], and an `ItemId -> RowHandle`
//! index resolves identity. Position in the sequence is never used to decide
//! which item a row belongs to.

use crate::drag::Placement;
use crate::error::MissingRowError;
use crate::models::{Item, ItemId, OrderRecord};
use std::collections::HashMap;

/// Handle to a row in the arena. Handles from before the last full
/// [`ListView::render`] no longer resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowHandle {
    slot: usize,
    epoch: u32,
}

/// One position in the visual sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Row(RowHandle),
    Placeholder,
}

/// Render key for a position in the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKey {
    Row(ItemId),
    Placeholder,
}

#[derive(Clone, Debug)]
struct Row {
    id: ItemId,
    text: String,
    /// Hidden while being dragged.
    hidden: bool,
    /// Hidden by the filter.
    filtered_out: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ListView {
    arena: Vec<Option<Row>>,
    epoch: u32,
    index: HashMap<ItemId, RowHandle>,
    sequence: Vec<Slot>,
    editing: Option<RowHandle>,
    filter: String,
}

fn matches_filter(text: &str, filter: &str) -> bool {
    filter.is_empty() || text.to_lowercase().contains(filter)
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every row and rebuilds from `items`, in the given order.
    pub fn render(&mut self, items: &[Item]) {
        self.arena.clear();
        self.index.clear();
        self.sequence.clear();
        self.editing = None;
        self.epoch = self.epoch.wrapping_add(1);

        for item in items {
            self.render_row(item);
        }
    }

    /// Appends one row without touching the others.
    pub fn render_row(&mut self, item: &Item) -> RowHandle {
        if let Some(existing) = self.index.get(&item.id).copied() {
            tracing::warn!(id = %item.id, "row already rendered, replacing");
            let _ = self.remove_row(existing);
        }

        let handle = RowHandle {
            slot: self.arena.len(),
            epoch: self.epoch,
        };
        self.arena.push(Some(Row {
            id: item.id,
            text: item.text.clone(),
            hidden: false,
            filtered_out: !matches_filter(&item.text, &self.filter),
        }));
        self.index.insert(item.id, handle);
        self.sequence.push(Slot::Row(handle));
        handle
    }

    fn row(&self, handle: RowHandle) -> Option<&Row> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.arena.get(handle.slot)?.as_ref()
    }

    fn row_mut(&mut self, handle: RowHandle) -> Option<&mut Row> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.arena.get_mut(handle.slot)?.as_mut()
    }

    pub fn handle_of(&self, id: ItemId) -> Option<RowHandle> {
        self.index.get(&id).copied()
    }

    pub fn id_of(&self, handle: RowHandle) -> Result<ItemId, MissingRowError> {
        self.row(handle)
            .map(|r| r.id)
            .ok_or(MissingRowError::StaleHandle)
    }

    pub fn text_of(&self, id: ItemId) -> Option<&str> {
        let handle = self.handle_of(id)?;
        self.row(handle).map(|r| r.text.as_str())
    }

    /// Updates a row's text in place; the row keeps its handle and position.
    pub fn patch_row_text(&mut self, handle: RowHandle, text: &str) -> Result<(), MissingRowError> {
        let filtered_out = !matches_filter(text, &self.filter);
        let row = self.row_mut(handle).ok_or(MissingRowError::StaleHandle)?;
        row.text = text.to_string();
        row.filtered_out = filtered_out;
        Ok(())
    }

    pub fn remove_row(&mut self, handle: RowHandle) -> Result<ItemId, MissingRowError> {
        let id = self.id_of(handle)?;
        self.arena[handle.slot] = None;
        self.index.remove(&id);
        self.sequence.retain(|s| *s != Slot::Row(handle));
        if self.editing == Some(handle) {
            self.editing = None;
        }
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether the filter and clear-all controls should be shown.
    pub fn has_rows(&self) -> bool {
        !self.is_empty()
    }

    /// Marks exactly one row as being edited.
    pub fn highlight_for_edit(&mut self, handle: RowHandle) -> Result<(), MissingRowError> {
        let id = self.id_of(handle)?;
        self.editing = Some(handle);
        tracing::debug!(id = %id, "row highlighted for edit");
        Ok(())
    }

    pub fn clear_highlight(&mut self) {
        self.editing = None;
    }

    pub fn is_editing(&self, id: ItemId) -> bool {
        self.editing.is_some() && self.editing == self.handle_of(id)
    }

    /// Hides rows whose text does not contain `query`, ignoring case.
    pub fn apply_filter(&mut self, query: &str) {
        self.filter = query.to_lowercase();
        let filter = self.filter.clone();
        for row in self.arena.iter_mut().flatten() {
            row.filtered_out = !matches_filter(&row.text, &filter);
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_hidden(&mut self, handle: RowHandle, hidden: bool) -> Result<(), MissingRowError> {
        let row = self.row_mut(handle).ok_or(MissingRowError::StaleHandle)?;
        row.hidden = hidden;
        Ok(())
    }

    pub fn is_visible(&self, id: ItemId) -> bool {
        self.handle_of(id)
            .and_then(|h| self.row(h))
            .is_some_and(|r| !r.hidden && !r.filtered_out)
    }

    fn position_of(&self, slot: Slot) -> Option<usize> {
        self.sequence.iter().position(|s| *s == slot)
    }

    pub fn placeholder_index(&self) -> Option<usize> {
        self.position_of(Slot::Placeholder)
    }

    pub fn is_placeholder_attached(&self) -> bool {
        self.placeholder_index().is_some()
    }

    /// Puts the placeholder next to `target`, detaching it from wherever it
    /// was. Returns false when the placeholder was already there.
    pub fn place_placeholder(
        &mut self,
        target: RowHandle,
        placement: Placement,
    ) -> Result<bool, MissingRowError> {
        let target_id = self.id_of(target)?;
        let before = self.sequence.clone();

        self.detach_placeholder();
        let idx = self
            .position_of(Slot::Row(target))
            .ok_or(MissingRowError::Item(target_id))?;
        let at = match placement {
            Placement::Before => idx,
            Placement::After => idx + 1,
        };
        self.sequence.insert(at, Slot::Placeholder);

        Ok(self.sequence != before)
    }

    /// Returns true when the placeholder was attached.
    pub fn detach_placeholder(&mut self) -> bool {
        match self.placeholder_index() {
            Some(idx) => {
                self.sequence.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Moves `handle` to the placeholder's position and detaches the
    /// placeholder. Returns false, changing nothing, when no placeholder is
    /// attached.
    pub fn move_to_placeholder(&mut self, handle: RowHandle) -> Result<bool, MissingRowError> {
        let id = self.id_of(handle)?;
        let Some(at) = self.placeholder_index() else {
            return Ok(false);
        };
        let from = self
            .position_of(Slot::Row(handle))
            .ok_or(MissingRowError::Item(id))?;

        // `from` and `at` differ, so replacing first leaves `from` valid.
        self.sequence[at] = Slot::Row(handle);
        self.sequence.remove(from);
        Ok(true)
    }

    /// Reads the current row order back as ids.
    pub fn order_record(&self) -> OrderRecord {
        self.sequence
            .iter()
            .filter_map(|s| match s {
                Slot::Row(h) => self.row(*h).map(|r| r.id),
                Slot::Placeholder => None,
            })
            .collect()
    }

    /// Reorders rows to follow `record`.
    ///
    /// Ids without a row are skipped. Rows the record does not mention trail
    /// the recorded ones, keeping their current relative order.
    pub fn restore_order(&mut self, record: &OrderRecord) {
        let mut ordered = Vec::with_capacity(self.sequence.len());
        for id in record.ids() {
            match self.handle_of(*id) {
                Some(h) if !ordered.contains(&Slot::Row(h)) => ordered.push(Slot::Row(h)),
                Some(_) => {}
                None => tracing::debug!(error = %MissingRowError::Item(*id), "skipping stale id"),
            }
        }
        for slot in &self.sequence {
            if let Slot::Row(_) = slot {
                if !ordered.contains(slot) {
                    ordered.push(*slot);
                }
            }
        }
        self.sequence = ordered;
    }

    pub fn slot_keys(&self) -> Vec<SlotKey> {
        self.sequence
            .iter()
            .filter_map(|s| match s {
                Slot::Row(h) => self.row(*h).map(|r| SlotKey::Row(r.id)),
                Slot::Placeholder => Some(SlotKey::Placeholder),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(texts: &[&str]) -> Vec<Item> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Item::new(ItemId(i as u64 + 1), *t))
            .collect()
    }

    fn view(texts: &[&str]) -> ListView {
        let mut v = ListView::new();
        v.render(&items(texts));
        v
    }

    fn ids(v: &ListView) -> Vec<u64> {
        v.order_record().ids().iter().map(|i| i.0).collect()
    }

    fn handle(v: &ListView, id: u64) -> RowHandle {
        v.handle_of(ItemId(id)).expect("row should exist")
    }

    #[test]
    fn test_render_builds_one_row_per_item() {
        let v = view(&["a", "b", "c"]);
        assert_eq!(ids(&v), vec![1, 2, 3]);
        assert_eq!(v.text_of(ItemId(2)), Some("b"));
        assert!(v.has_rows());
    }

    #[test]
    fn test_render_replaces_previous_rows_and_invalidates_handles() {
        let mut v = view(&["a", "b"]);
        let stale = handle(&v, 1);
        v.render(&items(&["x"]));

        assert_eq!(ids(&v), vec![1]);
        assert_eq!(v.text_of(ItemId(1)), Some("x"));
        assert!(v.patch_row_text(stale, "y").is_err());
    }

    #[test]
    fn test_render_row_appends() {
        let mut v = view(&["a"]);
        v.render_row(&Item::new(ItemId(5), "z"));
        assert_eq!(ids(&v), vec![1, 5]);
    }

    #[test]
    fn test_patch_row_text_keeps_handle_and_position() {
        let mut v = view(&["a", "b"]);
        let h = handle(&v, 1);
        v.patch_row_text(h, "bread").expect("row exists");
        assert_eq!(v.handle_of(ItemId(1)), Some(h));
        assert_eq!(v.text_of(ItemId(1)), Some("bread"));
        assert_eq!(ids(&v), vec![1, 2]);
    }

    #[test]
    fn test_patch_row_text_reapplies_active_filter() {
        let mut v = view(&["milk", "eggs"]);
        v.apply_filter("ilk");
        assert!(!v.is_visible(ItemId(2)));

        v.patch_row_text(handle(&v, 2), "silk").expect("row exists");
        assert!(v.is_visible(ItemId(2)));
        v.patch_row_text(handle(&v, 1), "bread").expect("row exists");
        assert!(!v.is_visible(ItemId(1)));
    }

    #[test]
    fn test_remove_row_drops_index_and_highlight() {
        let mut v = view(&["a", "b"]);
        let h = handle(&v, 1);
        v.highlight_for_edit(h).expect("row exists");
        assert_eq!(v.remove_row(h), Ok(ItemId(1)));
        assert!(!v.is_editing(ItemId(1)));
        assert!(v.handle_of(ItemId(1)).is_none());
        assert!(v.remove_row(h).is_err());
        assert_eq!(ids(&v), vec![2]);
    }

    #[test]
    fn test_highlight_marks_exactly_one_row() {
        let mut v = view(&["a", "b"]);
        v.highlight_for_edit(handle(&v, 1)).expect("row exists");
        v.highlight_for_edit(handle(&v, 2)).expect("row exists");
        assert!(!v.is_editing(ItemId(1)));
        assert!(v.is_editing(ItemId(2)));
        v.clear_highlight();
        assert!(!v.is_editing(ItemId(2)));
    }

    #[test]
    fn test_filter_hides_without_removing() {
        let mut v = view(&["milk", "eggs"]);
        v.apply_filter("ILK");
        assert!(v.is_visible(ItemId(1)));
        assert!(!v.is_visible(ItemId(2)));
        assert_eq!(ids(&v), vec![1, 2]);

        v.apply_filter("");
        assert!(v.is_visible(ItemId(2)));
    }

    #[test]
    fn test_filter_applies_to_new_and_patched_rows() {
        let mut v = view(&["milk"]);
        v.apply_filter("ilk");
        v.render_row(&Item::new(ItemId(2), "eggs"));
        assert!(!v.is_visible(ItemId(2)));

        v.patch_row_text(handle(&v, 1), "bread").expect("row exists");
        assert!(!v.is_visible(ItemId(1)));
    }

    #[test]
    fn test_placeholder_before_and_after() {
        let mut v = view(&["a", "b", "c"]);
        v.place_placeholder(handle(&v, 2), Placement::Before)
            .expect("row exists");
        assert_eq!(v.placeholder_index(), Some(1));

        v.place_placeholder(handle(&v, 2), Placement::After)
            .expect("row exists");
        assert_eq!(v.placeholder_index(), Some(2));
        assert_eq!(
            v.slot_keys()
                .iter()
                .filter(|k| **k == SlotKey::Placeholder)
                .count(),
            1
        );
    }

    #[test]
    fn test_placeholder_reports_when_nothing_moved() {
        let mut v = view(&["a", "b"]);
        assert_eq!(v.place_placeholder(handle(&v, 1), Placement::After), Ok(true));
        assert_eq!(v.place_placeholder(handle(&v, 1), Placement::After), Ok(false));
        // After a and before b are the same gap.
        assert_eq!(v.place_placeholder(handle(&v, 2), Placement::Before), Ok(false));
    }

    #[test]
    fn test_move_to_placeholder() {
        let mut v = view(&["a", "b", "c"]);
        v.place_placeholder(handle(&v, 1), Placement::Before)
            .expect("row exists");
        assert_eq!(v.move_to_placeholder(handle(&v, 3)), Ok(true));
        assert!(!v.is_placeholder_attached());
        assert_eq!(ids(&v), vec![3, 1, 2]);
    }

    #[test]
    fn test_move_to_placeholder_downwards() {
        let mut v = view(&["a", "b", "c"]);
        v.place_placeholder(handle(&v, 3), Placement::After)
            .expect("row exists");
        assert_eq!(v.move_to_placeholder(handle(&v, 1)), Ok(true));
        assert_eq!(ids(&v), vec![2, 3, 1]);
    }

    #[test]
    fn test_move_without_placeholder_is_noop() {
        let mut v = view(&["a", "b"]);
        assert_eq!(v.move_to_placeholder(handle(&v, 2)), Ok(false));
        assert_eq!(ids(&v), vec![1, 2]);
    }

    #[test]
    fn test_order_record_skips_placeholder() {
        let mut v = view(&["a", "b"]);
        v.place_placeholder(handle(&v, 1), Placement::After)
            .expect("row exists");
        assert_eq!(ids(&v), vec![1, 2]);
    }

    #[test]
    fn test_restore_order_follows_record() {
        let mut v = view(&["a", "b", "c"]);
        v.restore_order(&OrderRecord::from(vec![ItemId(3), ItemId(1), ItemId(2)]));
        assert_eq!(ids(&v), vec![3, 1, 2]);
    }

    #[test]
    fn test_restore_order_skips_stale_ids() {
        let mut v = view(&["a", "c"]);
        v.render(&[Item::new(ItemId(1), "a"), Item::new(ItemId(3), "c")]);
        v.restore_order(&OrderRecord::from(vec![ItemId(3), ItemId(2), ItemId(1)]));
        assert_eq!(ids(&v), vec![3, 1]);
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn test_restore_order_unrecorded_rows_trail() {
        let mut v = view(&["a", "b", "c", "d"]);
        v.restore_order(&OrderRecord::from(vec![ItemId(3), ItemId(1)]));
        assert_eq!(ids(&v), vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_restore_order_renders_every_row_once() {
        let mut v = view(&["a", "b", "c"]);
        v.restore_order(&OrderRecord::from(vec![
            ItemId(2),
            ItemId(2),
            ItemId(9),
            ItemId(1),
            ItemId(7),
        ]));
        let mut got = ids(&v);
        assert_eq!(got, vec![2, 1, 3]);
        got.sort();
        got.dedup();
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn test_hidden_row_is_not_visible_but_stays_in_order() {
        let mut v = view(&["a", "b"]);
        v.set_hidden(handle(&v, 1), true).expect("row exists");
        assert!(!v.is_visible(ItemId(1)));
        assert_eq!(ids(&v), vec![1, 2]);
    }
}
