//! Drop event wire types
//!
//! Mirrors the payload the board UI's drag-and-drop layer emits: what was
//! dragged, where it came from, and (if the gesture ended over a lane)
//! where it landed.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two drag contexts the board supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    /// A whole lane being reordered
    Stage,
    /// A lead card moving between (or within) lanes
    Lead,
}

/// A position inside a droppable area. For lead drops `droppable_id` is a
/// stage id; for lane drops it is the board itself and only `index` counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub droppable_id: String,
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropEvent {
    pub kind: DragKind,
    /// Stage id or lead uuid, depending on `kind`
    pub draggable_id: String,
    pub source: DropTarget,
    /// Absent when the gesture ended outside every lane
    pub destination: Option<DropTarget>,
}

/// What a resolved drop requires of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    /// Nothing to do (no destination, or dropped back onto its own spot)
    None,
    /// Splice the lane order and renumber
    ReorderLanes { from: usize, to: usize },
    /// Persist the status change remotely, then patch the cache
    MoveLead { lead: Uuid, to_stage: String },
}
