//! Leadboard Stages: the funnel stage registry
//!
//! Holds the set of kanban lanes. Seeded with the fixed default funnel at
//! startup; staff can add, delete, swap and reorder lanes at runtime. All
//! mutations happen in memory only.

mod registry;
mod slug;

pub use registry::{StageRegistry, DEFAULT_STAGES};
pub use slug::slugify;
