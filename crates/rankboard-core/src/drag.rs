//! Drag gesture state machine for moving entities between the sequences.
//!
//! The input layer reports start/over/end events; [`DragState::apply`]
//! turns each one into the next state and the next store. Cross-sequence
//! moves happen live on over events, in-sequence reordering happens on
//! release.

use crate::entity::{EntityId, EntityStore, SequenceKind};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// What the pointer is currently over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropTarget {
    /// Another entity.
    Entity(EntityId),
    /// The empty area of a sequence.
    Sequence(SequenceKind),
}

/// Drag lifecycle events reported by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragEvent {
    Start {
        dragged: EntityId,
    },
    Over {
        dragged: EntityId,
        target: DropTarget,
        /// Dragged box is below the target box.
        pointer_below: bool,
    },
    End {
        dragged: EntityId,
        target: Option<DropTarget>,
    },
}

/// State of the current drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// No entity is being dragged.
    #[default]
    Idle,
    /// An entity is being dragged.
    Dragging {
        /// The dragged entity.
        active: EntityId,
        /// Sequence the entity was in when the gesture started.
        origin: SequenceKind,
    },
}

impl DragState {
    /// Check if a gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// The entity being dragged, if any.
    pub fn active(&self) -> Option<EntityId> {
        match self {
            DragState::Dragging { active, .. } => Some(*active),
            DragState::Idle => None,
        }
    }

    /// Apply one event, returning the next state and store.
    ///
    /// Events that reference unknown ids or sequences leave the store
    /// untouched.
    pub fn apply(self, mut store: EntityStore, event: &DragEvent) -> (DragState, EntityStore) {
        match *event {
            DragEvent::Start { dragged } => match store.locate(dragged) {
                Some(origin) => (
                    DragState::Dragging {
                        active: dragged,
                        origin,
                    },
                    store,
                ),
                None => {
                    log::trace!("Drag start on unknown entity {}", dragged);
                    (DragState::Idle, store)
                }
            },
            DragEvent::Over {
                dragged,
                target,
                pointer_below,
            } => {
                if self.active() == Some(dragged) {
                    transfer(&mut store, dragged, target, pointer_below);
                } else {
                    log::trace!("Ignoring drag over for inactive entity {}", dragged);
                }
                (self, store)
            }
            DragEvent::End { dragged, target } => {
                if self.active() == Some(dragged) {
                    if let Some(target) = target {
                        reorder(&mut store, dragged, target);
                    }
                } else {
                    log::trace!("Ignoring drag end for inactive entity {}", dragged);
                }
                (DragState::Idle, store)
            }
        }
    }
}

/// Whether the dragged box sits below the box it is over.
///
/// Input layers use this to fill `pointer_below` on [`DragEvent::Over`].
pub fn pointer_below(dragged: Rect, over: Rect) -> bool {
    dragged.y0 > over.y1
}

fn resolve_target(store: &EntityStore, target: DropTarget) -> Option<SequenceKind> {
    match target {
        DropTarget::Sequence(kind) => Some(kind),
        DropTarget::Entity(id) => store.locate(id),
    }
}

/// Move the dragged entity into the sequence under the pointer.
fn transfer(store: &mut EntityStore, dragged: EntityId, target: DropTarget, below: bool) {
    let Some(current) = store.locate(dragged) else {
        return;
    };
    let Some(over) = resolve_target(store, target) else {
        return;
    };
    if over == current {
        return;
    }

    let Some((_, entity)) = store.take(dragged) else {
        return;
    };
    let len = store.sequence(over).len();
    let index = match target {
        DropTarget::Sequence(_) => len,
        DropTarget::Entity(id) => match store.index_of(over, id) {
            Some(i) if below => i + 1,
            Some(i) => i,
            None => len,
        },
    };
    store.insert(over, index, entity);
    log::trace!("Moved {} into {:?} at {}", dragged, over, index);
}

/// Finish a gesture with an in-sequence move, if one applies.
fn reorder(store: &mut EntityStore, dragged: EntityId, target: DropTarget) {
    let Some(active_kind) = store.locate(dragged) else {
        return;
    };
    let Some(over_kind) = resolve_target(store, target) else {
        return;
    };
    if active_kind != over_kind {
        return;
    }

    let Some(from) = store.index_of(active_kind, dragged) else {
        return;
    };
    let to = match target {
        // Dropping on the empty area sends the entity to the end.
        DropTarget::Sequence(_) => store.sequence(active_kind).len() - 1,
        DropTarget::Entity(id) => match store.index_of(over_kind, id) {
            Some(i) => i,
            None => return,
        },
    };
    if store.move_within(active_kind, from, to) {
        log::trace!("Reordered {} in {:?} from {} to {}", dragged, active_kind, from, to);
    }
}
