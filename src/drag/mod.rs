//! Drag-to-reorder.
//!
//! Pointer path: `start` -> (next tick) `conceal` -> `hover`* -> `drop`? ->
//! (next tick) `end`. Touch path: `start` -> `hover`* -> `touch_end`.
//!
//! A gesture commits at most once: `end` reports [`DragOutcome::Reordered`]
//! only if a drop actually moved the dragged row.

use crate::models::{ItemId, OrderRecord};
use crate::session::Session;
use crate::view::{ListView, RowHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragSource {
    Pointer,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Vertical extent of a row, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowRect {
    pub top: f64,
    pub height: f64,
}

impl RowRect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Strictly above the midpoint goes before; on or below goes after.
    pub fn placement_for(&self, y: f64) -> Placement {
        if y < self.midpoint() {
            Placement::Before
        } else {
            Placement::After
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragGesture {
    pub id: ItemId,
    pub row: RowHandle,
    pub source: DragSource,
    /// Set once a drop has moved the row.
    pub moved: bool,
}

impl DragGesture {
    pub fn new(id: ItemId, row: RowHandle, source: DragSource) -> Self {
        Self {
            id,
            row,
            source,
            moved: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// The row moved; this order should be committed.
    Reordered(OrderRecord),
    /// Cancelled, dropped in place, or no gesture was active.
    Unchanged,
}

/// Picks up the row of `id`. Returns false when no drag started.
pub fn start(session: &mut Session, view: &ListView, id: ItemId, source: DragSource) -> bool {
    let Some(row) = view.handle_of(id) else {
        tracing::debug!(id = %id, "drag start on unknown row");
        return false;
    };
    let started = session.begin_drag(DragGesture::new(id, row, source));
    if started {
        tracing::debug!(id = %id, ?source, "drag started");
    }
    started
}

/// Hides the dragged row. Runs one tick after `start` so the native drag
/// image is captured first; does nothing if the gesture already ended.
pub fn conceal(session: &Session, view: &mut ListView) -> bool {
    let Some(gesture) = session.drag() else {
        return false;
    };
    match view.set_hidden(gesture.row, true) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "dragged row vanished before it could be hidden");
            false
        }
    }
}

/// Moves the placeholder next to the row of `target`, using the pointer's
/// vertical position against the row's midpoint. Returns true when the
/// placeholder moved.
pub fn hover(session: &Session, view: &mut ListView, target: ItemId, rect: RowRect, y: f64) -> bool {
    let Some(gesture) = session.drag() else {
        return false;
    };
    if gesture.id == target {
        return false;
    }
    let Some(row) = view.handle_of(target) else {
        return false;
    };

    match view.place_placeholder(row, rect.placement_for(y)) {
        Ok(moved) => moved,
        Err(e) => {
            tracing::debug!(error = %e, "hover target skipped");
            false
        }
    }
}

/// Moves the dragged row into the placeholder's position. Returns true when
/// the row moved.
pub fn drop(session: &mut Session, view: &mut ListView) -> bool {
    let Some(gesture) = session.drag_mut() else {
        return false;
    };
    match view.move_to_placeholder(gesture.row) {
        Ok(true) => {
            gesture.moved = true;
            tracing::debug!(id = %gesture.id, "row dropped");
            true
        }
        Ok(false) => false,
        Err(e) => {
            tracing::warn!(error = %e, "dropped row is gone");
            view.detach_placeholder();
            false
        }
    }
}

/// Finishes the gesture: the row is shown again, the placeholder detached,
/// and the session returns to idle.
pub fn end(session: &mut Session, view: &mut ListView) -> DragOutcome {
    let Some(gesture) = session.take_drag() else {
        return DragOutcome::Unchanged;
    };
    if let Err(e) = view.set_hidden(gesture.row, false) {
        tracing::debug!(error = %e, "dragged row is gone");
    }
    view.detach_placeholder();

    if gesture.moved {
        tracing::debug!(id = %gesture.id, "drag committed");
        DragOutcome::Reordered(view.order_record())
    } else {
        tracing::debug!(id = %gesture.id, "drag ended without a move");
        DragOutcome::Unchanged
    }
}

/// Touch devices get no separate drop event, so lifting the finger both
/// drops and ends.
pub fn touch_end(session: &mut Session, view: &mut ListView) -> DragOutcome {
    drop(session, view);
    end(session, view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use crate::view::SlotKey;

    fn view(texts: &[&str]) -> ListView {
        let items: Vec<_> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Item::new(ItemId(i as u64 + 1), *t))
            .collect();
        let mut v = ListView::new();
        v.render(&items);
        v
    }

    fn ids(v: &ListView) -> Vec<u64> {
        v.order_record().ids().iter().map(|i| i.0).collect()
    }

    // Rows are 30px tall, stacked from y = 0.
    fn rect(id: u64) -> RowRect {
        RowRect::new((id - 1) as f64 * 30.0, 30.0)
    }

    #[test]
    fn test_midpoint_tie_break() {
        let r = RowRect::new(100.0, 40.0);
        assert_eq!(r.midpoint(), 120.0);
        assert_eq!(r.placement_for(119.999), Placement::Before);
        assert_eq!(r.placement_for(120.0), Placement::After);
        assert_eq!(r.placement_for(150.0), Placement::After);
        assert_eq!(r.placement_for(90.0), Placement::Before);
    }

    #[test]
    fn test_pointer_drag_to_top_commits_new_order() {
        let mut v = view(&["a", "b", "c"]);
        let mut s = Session::default();

        assert!(start(&mut s, &v, ItemId(3), DragSource::Pointer));
        assert!(conceal(&s, &mut v));
        assert!(!v.is_visible(ItemId(3)));

        assert!(hover(&s, &mut v, ItemId(1), rect(1), 5.0));
        assert_eq!(v.placeholder_index(), Some(0));
        assert!(drop(&mut s, &mut v));

        let outcome = end(&mut s, &mut v);
        assert_eq!(
            outcome,
            DragOutcome::Reordered(OrderRecord::from(vec![ItemId(3), ItemId(1), ItemId(2)]))
        );
        assert!(s.is_idle());
        assert!(v.is_visible(ItemId(3)));
        assert!(!v.is_placeholder_attached());
    }

    #[test]
    fn test_end_commits_only_once() {
        let mut v = view(&["a", "b"]);
        let mut s = Session::default();
        start(&mut s, &v, ItemId(1), DragSource::Pointer);
        hover(&s, &mut v, ItemId(2), rect(2), 59.0);
        drop(&mut s, &mut v);

        assert!(matches!(end(&mut s, &mut v), DragOutcome::Reordered(_)));
        assert_eq!(end(&mut s, &mut v), DragOutcome::Unchanged);
        assert_eq!(ids(&v), vec![2, 1]);
    }

    #[test]
    fn test_cancelled_drag_restores_and_does_not_commit() {
        let mut v = view(&["a", "b", "c"]);
        let mut s = Session::default();
        start(&mut s, &v, ItemId(2), DragSource::Pointer);
        conceal(&s, &mut v);
        hover(&s, &mut v, ItemId(3), rect(3), 80.0);
        assert!(v.is_placeholder_attached());

        assert_eq!(end(&mut s, &mut v), DragOutcome::Unchanged);
        assert!(v.is_visible(ItemId(2)));
        assert!(!v.is_placeholder_attached());
        assert_eq!(ids(&v), vec![1, 2, 3]);
    }

    #[test]
    fn test_drop_without_placeholder_is_unchanged() {
        let mut v = view(&["a", "b"]);
        let mut s = Session::default();
        start(&mut s, &v, ItemId(1), DragSource::Pointer);
        assert!(!drop(&mut s, &mut v));
        assert_eq!(end(&mut s, &mut v), DragOutcome::Unchanged);
    }

    #[test]
    fn test_hover_over_dragged_row_is_ignored() {
        let mut v = view(&["a", "b"]);
        let mut s = Session::default();
        start(&mut s, &v, ItemId(1), DragSource::Pointer);
        assert!(!hover(&s, &mut v, ItemId(1), rect(1), 1.0));
        assert!(!v.is_placeholder_attached());
    }

    #[test]
    fn test_hover_without_drag_is_ignored() {
        let mut v = view(&["a", "b"]);
        let s = Session::default();
        assert!(!hover(&s, &mut v, ItemId(2), rect(2), 31.0));
        assert!(!v.is_placeholder_attached());
    }

    #[test]
    fn test_single_placeholder_follows_cursor() {
        let mut v = view(&["a", "b", "c", "d"]);
        let mut s = Session::default();
        start(&mut s, &v, ItemId(1), DragSource::Pointer);

        for (target, y) in [(2, 31.0), (3, 89.0), (4, 100.0), (2, 50.0)] {
            hover(&s, &mut v, ItemId(target), rect(target), y);
            let placeholders = v
                .slot_keys()
                .into_iter()
                .filter(|k| *k == SlotKey::Placeholder)
                .count();
            assert_eq!(placeholders, 1);
        }
        // Last hover: below the midpoint of b.
        assert_eq!(v.placeholder_index(), Some(2));
    }

    #[test]
    fn test_conceal_after_end_is_noop() {
        let mut v = view(&["a"]);
        let mut s = Session::default();
        start(&mut s, &v, ItemId(1), DragSource::Pointer);
        end(&mut s, &mut v);
        assert!(!conceal(&s, &mut v));
        assert!(v.is_visible(ItemId(1)));
    }

    #[test]
    fn test_touch_gesture_moves_and_commits() {
        let mut v = view(&["a", "b", "c"]);
        let mut s = Session::default();
        assert!(start(&mut s, &v, ItemId(1), DragSource::Touch));
        hover(&s, &mut v, ItemId(3), rect(3), 75.0);

        let outcome = touch_end(&mut s, &mut v);
        assert_eq!(
            outcome,
            DragOutcome::Reordered(OrderRecord::from(vec![ItemId(2), ItemId(3), ItemId(1)]))
        );
        assert!(s.is_idle());
        assert!(!v.is_placeholder_attached());
    }

    #[test]
    fn test_touch_tap_without_move_is_unchanged() {
        let mut v = view(&["a", "b"]);
        let mut s = Session::default();
        start(&mut s, &v, ItemId(1), DragSource::Touch);
        assert_eq!(touch_end(&mut s, &mut v), DragOutcome::Unchanged);
        assert!(s.is_idle());
    }

    #[test]
    fn test_drop_in_original_gap_commits_same_order() {
        let mut v = view(&["a", "b", "c"]);
        let mut s = Session::default();
        start(&mut s, &v, ItemId(2), DragSource::Pointer);
        // Just below a's midpoint: the gap b already occupies.
        hover(&s, &mut v, ItemId(1), rect(1), 20.0);
        drop(&mut s, &mut v);
        assert_eq!(
            end(&mut s, &mut v),
            DragOutcome::Reordered(OrderRecord::from(vec![ItemId(1), ItemId(2), ItemId(3)]))
        );
    }

    #[test]
    fn test_start_abandons_edit() {
        let v = view(&["a", "b"]);
        let mut s = Session::default();
        s.begin_edit(crate::session::EditTarget {
            id: ItemId(1),
            row: v.handle_of(ItemId(1)).expect("row 1"),
        });
        assert!(start(&mut s, &v, ItemId(2), DragSource::Pointer));
        assert!(s.editing().is_none());
        assert_eq!(s.drag().map(|g| g.id), Some(ItemId(2)));
    }

    #[test]
    fn test_start_on_unknown_row_is_refused() {
        let v = view(&["a"]);
        let mut s = Session::default();
        assert!(!start(&mut s, &v, ItemId(9), DragSource::Touch));
        assert!(s.is_idle());
    }
}
