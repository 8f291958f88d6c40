//! Stage Registry
use leadboard_core::{FunnelError, FunnelStage, PENDING_STAGE};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::slug::slugify;

/// The seeded funnel. None of these lanes is deletable; "pending" doubles
/// as the reassignment target when a custom lane is removed.
pub static DEFAULT_STAGES: Lazy<Vec<FunnelStage>> = Lazy::new(|| {
    let defaults = [
        (PENDING_STAGE, "Pending", "amber"),
        ("contacted", "Contacted", "sky"),
        ("scheduled", "Class Scheduled", "violet"),
        ("attended", "Attended Trial", "teal"),
        ("enrolled", "Enrolled", "emerald"),
        ("lost", "Lost", "rose"),
    ];
    defaults
        .iter()
        .enumerate()
        .map(|(i, (id, title, color))| FunnelStage {
            id: id.to_string(),
            title: title.to_string(),
            color: color.to_string(),
            order: i as u32,
            editable: false,
        })
        .collect()
});

/// The set of kanban lanes, kept sorted by their `order` field.
///
/// Orders stay dense (0..n-1): removal and drag reordering renumber the
/// whole list, swapping exchanges two existing values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRegistry {
    stages: Vec<FunnelStage>,
}

impl StageRegistry {
    /// Empty registry. Mostly useful in tests.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Registry seeded with the default funnel.
    pub fn with_defaults() -> Self {
        Self {
            stages: DEFAULT_STAGES.clone(),
        }
    }

    /// All stages, sorted by order.
    pub fn list(&self) -> &[FunnelStage] {
        &self.stages
    }

    pub fn get(&self, id: &str) -> Option<&FunnelStage> {
        self.stages.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Create a stage from a display title. The id is the slugified title
    /// and the order lands strictly after every existing stage.
    pub fn add(&mut self, title: &str, color: &str) -> Result<FunnelStage, FunnelError> {
        let id = slugify(title);
        if id.is_empty() {
            return Err(FunnelError::InvalidStageTitle(title.to_string()));
        }
        if self.contains(&id) {
            return Err(FunnelError::DuplicateStage(id));
        }
        let order = self.stages.iter().map(|s| s.order + 1).max().unwrap_or(0);
        let stage = FunnelStage {
            id,
            title: title.trim().to_string(),
            color: color.to_string(),
            order,
            editable: true,
        };
        self.stages.push(stage.clone());
        self.sort();
        Ok(stage)
    }

    /// Remove a user-created stage. Default stages are refused before any
    /// mutation happens. Remaining lanes are renumbered to stay dense.
    ///
    /// Lead reassignment is the caller's job and must happen first, while
    /// the stage still exists.
    pub fn remove(&mut self, id: &str) -> Result<FunnelStage, FunnelError> {
        let idx = self
            .stages
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| FunnelError::StageNotFound(id.to_string()))?;
        if !self.stages[idx].editable {
            return Err(FunnelError::StageNotEditable(id.to_string()));
        }
        let removed = self.stages.remove(idx);
        self.renumber();
        Ok(removed)
    }

    /// Exchange the order values of two stages (the arrow-button variant of
    /// reordering).
    pub fn swap(&mut self, a: &str, b: &str) -> Result<(), FunnelError> {
        let ia = self
            .stages
            .iter()
            .position(|s| s.id == a)
            .ok_or_else(|| FunnelError::StageNotFound(a.to_string()))?;
        let ib = self
            .stages
            .iter()
            .position(|s| s.id == b)
            .ok_or_else(|| FunnelError::StageNotFound(b.to_string()))?;
        let tmp = self.stages[ia].order;
        self.stages[ia].order = self.stages[ib].order;
        self.stages[ib].order = tmp;
        self.sort();
        Ok(())
    }

    /// Drag variant of reordering: splice the sorted list (take the lane at
    /// `from`, insert it at `to`) and renumber everything 0..n-1.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), FunnelError> {
        if from >= self.stages.len() {
            return Err(FunnelError::StageIndexOutOfRange(from));
        }
        if to >= self.stages.len() {
            return Err(FunnelError::StageIndexOutOfRange(to));
        }
        let stage = self.stages.remove(from);
        self.stages.insert(to, stage);
        self.renumber();
        Ok(())
    }

    fn sort(&mut self) {
        self.stages.sort_by_key(|s| s.order);
    }

    fn renumber(&mut self) {
        for (i, stage) in self.stages.iter_mut().enumerate() {
            stage.order = i as u32;
        }
    }
}

impl Default for StageRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
