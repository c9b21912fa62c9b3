use crate::drag::DragGesture;
use crate::models::ItemId;
use crate::view::RowHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditTarget {
    pub id: ItemId,
    pub row: RowHandle,
}

/// What the user is doing with the list right now.
///
/// A single slot: editing and dragging exclude each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Idle,
    Editing(EditTarget),
    Dragging(DragGesture),
}

/// Label of the submit control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::AsRefStr)]
pub enum SubmitMode {
    #[default]
    #[strum(to_string = "Add Item")]
    Add,
    #[strum(to_string = "Update Item")]
    Update,
}

impl Session {
    pub fn is_idle(&self) -> bool {
        matches!(self, Session::Idle)
    }

    pub fn submit_mode(&self) -> SubmitMode {
        match self {
            Session::Editing(_) => SubmitMode::Update,
            _ => SubmitMode::Add,
        }
    }

    pub fn editing(&self) -> Option<EditTarget> {
        match self {
            Session::Editing(target) => Some(*target),
            _ => None,
        }
    }

    pub fn drag(&self) -> Option<&DragGesture> {
        match self {
            Session::Dragging(gesture) => Some(gesture),
            _ => None,
        }
    }

    pub fn drag_mut(&mut self) -> Option<&mut DragGesture> {
        match self {
            Session::Dragging(gesture) => Some(gesture),
            _ => None,
        }
    }

    /// Idle or Editing -> Editing(target). Refused while dragging.
    pub fn begin_edit(&mut self, target: EditTarget) -> bool {
        if let Session::Dragging(gesture) = self {
            tracing::debug!(dragged = %gesture.id, "edit refused during drag");
            return false;
        }
        *self = Session::Editing(target);
        true
    }

    /// Ends the edit session, returning its target.
    pub fn take_edit(&mut self) -> Option<EditTarget> {
        let target = self.editing()?;
        *self = Session::Idle;
        Some(target)
    }

    /// Idle or Editing -> Dragging. Picking up a row abandons the edit.
    /// Refused while another drag is in progress.
    pub fn begin_drag(&mut self, gesture: DragGesture) -> bool {
        match self {
            Session::Idle => {
                *self = Session::Dragging(gesture);
                true
            }
            Session::Editing(target) => {
                tracing::debug!(editing = %target.id, "edit abandoned for drag");
                *self = Session::Dragging(gesture);
                true
            }
            Session::Dragging(current) => {
                tracing::debug!(dragged = %current.id, "drag already in progress");
                false
            }
        }
    }

    /// Ends the drag, returning its gesture.
    pub fn take_drag(&mut self) -> Option<DragGesture> {
        let gesture = *self.drag()?;
        *self = Session::Idle;
        Some(gesture)
    }

    pub fn reset(&mut self) {
        *self = Session::Idle;
    }
}
