//! Leadboard Board: lead cache, column projection and drop resolution
//!
//! The board owns the in-memory view the CRM works against: the ordered
//! lead cache (loaded once from the store) and the stage registry. Drag
//! gestures come in as [`DropEvent`]s and resolve to a [`DropAction`] the
//! API layer executes — remote write first, local patch second.

mod cache;
mod drag;

pub use cache::LeadCache;
pub use drag::{DragKind, DropAction, DropEvent, DropTarget};

use leadboard_core::{FunnelError, FunnelStage, Lead};
use leadboard_stages::StageRegistry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One rendered lane: stage metadata plus the leads currently in it,
/// cache order (creation descending) preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardColumn {
    pub stage: FunnelStage,
    pub leads: Vec<Lead>,
}

/// The full CRM board state.
#[derive(Debug, Clone)]
pub struct Board {
    pub cache: LeadCache,
    pub registry: StageRegistry,
}

impl Board {
    /// Empty board over the default funnel.
    pub fn with_defaults() -> Self {
        Self {
            cache: LeadCache::new(),
            registry: StageRegistry::with_defaults(),
        }
    }

    pub fn with_registry(registry: StageRegistry) -> Self {
        Self {
            cache: LeadCache::new(),
            registry,
        }
    }

    /// Project the cache and registry into stage-grouped columns. Leads
    /// whose status matches no registered stage are not rendered.
    pub fn columns(&self) -> Vec<BoardColumn> {
        self.registry
            .list()
            .iter()
            .map(|stage| BoardColumn {
                stage: stage.clone(),
                leads: self
                    .cache
                    .leads()
                    .iter()
                    .filter(|l| l.status == stage.id)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    /// Resolve a drop gesture to the action it requires. Pure: nothing is
    /// mutated and no remote call is made here.
    pub fn resolve_drop(&self, event: &DropEvent) -> Result<DropAction, FunnelError> {
        let Some(dest) = &event.destination else {
            // Dropped outside any lane
            return Ok(DropAction::None);
        };
        match event.kind {
            DragKind::Stage => {
                if dest.index == event.source.index {
                    return Ok(DropAction::None);
                }
                Ok(DropAction::ReorderLanes {
                    from: event.source.index,
                    to: dest.index,
                })
            }
            DragKind::Lead => {
                let lead_id = Uuid::parse_str(&event.draggable_id)
                    .map_err(|_| FunnelError::InvalidDrop(event.draggable_id.clone()))?;
                let lead = self
                    .cache
                    .get(lead_id)
                    .ok_or(FunnelError::LeadNotFound(lead_id))?;
                if !self.registry.contains(&dest.droppable_id) {
                    return Err(FunnelError::StageNotFound(dest.droppable_id.clone()));
                }
                if dest.droppable_id == lead.status && dest.index == event.source.index {
                    return Ok(DropAction::None);
                }
                Ok(DropAction::MoveLead {
                    lead: lead_id,
                    to_stage: dest.droppable_id.clone(),
                })
            }
        }
    }

    /// Ids of every lead currently sitting in the given stage.
    pub fn leads_in(&self, stage_id: &str) -> Vec<Uuid> {
        self.cache
            .leads()
            .iter()
            .filter(|l| l.status == stage_id)
            .map(|l| l.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use leadboard_core::PENDING_STAGE;

    fn lead(name: &str, status: &str) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            phone: "555-0100".to_string(),
            age: 9,
            class_day: "tuesday".to_string(),
            class_time: "18:30".to_string(),
            class_name: "Kids Jiu-Jitsu".to_string(),
            specific_date: None,
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    fn board_with(leads: Vec<Lead>) -> Board {
        let mut board = Board::with_defaults();
        board.cache.replace(leads);
        board
    }

    #[test]
    fn test_columns_group_by_stage_in_order() {
        let a = lead("Ana", PENDING_STAGE);
        let b = lead("Bruno", "contacted");
        let c = lead("Carla", PENDING_STAGE);
        let board = board_with(vec![a.clone(), b.clone(), c.clone()]);

        let cols = board.columns();
        assert_eq!(cols.len(), board.registry.len());
        assert_eq!(cols[0].stage.id, PENDING_STAGE);
        // Cache order survives the projection
        let names: Vec<_> = cols[0].leads.iter().map(|l| l.full_name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Carla"]);
        assert_eq!(cols[1].leads.len(), 1);
        assert_eq!(cols[1].leads[0].id, b.id);
    }

    #[test]
    fn test_columns_skip_unknown_status() {
        let stray = lead("Stray", "deleted-elsewhere");
        let board = board_with(vec![stray]);
        let total: usize = board.columns().iter().map(|c| c.leads.len()).sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn test_drop_without_destination_is_noop() {
        let l = lead("Ana", PENDING_STAGE);
        let board = board_with(vec![l.clone()]);
        let action = board
            .resolve_drop(&DropEvent {
                kind: DragKind::Lead,
                draggable_id: l.id.to_string(),
                source: DropTarget {
                    droppable_id: PENDING_STAGE.to_string(),
                    index: 0,
                },
                destination: None,
            })
            .unwrap();
        assert_eq!(action, DropAction::None);
    }

    #[test]
    fn test_lead_drop_same_stage_same_index_is_noop() {
        let l = lead("Ana", PENDING_STAGE);
        let board = board_with(vec![l.clone()]);
        let action = board
            .resolve_drop(&DropEvent {
                kind: DragKind::Lead,
                draggable_id: l.id.to_string(),
                source: DropTarget {
                    droppable_id: PENDING_STAGE.to_string(),
                    index: 2,
                },
                destination: Some(DropTarget {
                    droppable_id: PENDING_STAGE.to_string(),
                    index: 2,
                }),
            })
            .unwrap();
        assert_eq!(action, DropAction::None);
    }

    #[test]
    fn test_lead_drop_other_stage_moves() {
        let l = lead("Ana", PENDING_STAGE);
        let board = board_with(vec![l.clone()]);
        let action = board
            .resolve_drop(&DropEvent {
                kind: DragKind::Lead,
                draggable_id: l.id.to_string(),
                source: DropTarget {
                    droppable_id: PENDING_STAGE.to_string(),
                    index: 0,
                },
                destination: Some(DropTarget {
                    droppable_id: "contacted".to_string(),
                    index: 0,
                }),
            })
            .unwrap();
        assert_eq!(
            action,
            DropAction::MoveLead {
                lead: l.id,
                to_stage: "contacted".to_string()
            }
        );
    }

    #[test]
    fn test_lead_drop_unknown_stage_rejected() {
        let l = lead("Ana", PENDING_STAGE);
        let board = board_with(vec![l.clone()]);
        let err = board
            .resolve_drop(&DropEvent {
                kind: DragKind::Lead,
                draggable_id: l.id.to_string(),
                source: DropTarget {
                    droppable_id: PENDING_STAGE.to_string(),
                    index: 0,
                },
                destination: Some(DropTarget {
                    droppable_id: "nowhere".to_string(),
                    index: 0,
                }),
            })
            .unwrap_err();
        assert!(matches!(err, FunnelError::StageNotFound(_)));
    }

    #[test]
    fn test_lead_drop_garbage_id_rejected() {
        let board = board_with(vec![]);
        let err = board
            .resolve_drop(&DropEvent {
                kind: DragKind::Lead,
                draggable_id: "not-a-uuid".to_string(),
                source: DropTarget {
                    droppable_id: PENDING_STAGE.to_string(),
                    index: 0,
                },
                destination: Some(DropTarget {
                    droppable_id: "contacted".to_string(),
                    index: 0,
                }),
            })
            .unwrap_err();
        assert!(matches!(err, FunnelError::InvalidDrop(_)));
    }

    #[test]
    fn test_stage_drop_resolves_to_lane_reorder() {
        let board = board_with(vec![]);
        let action = board
            .resolve_drop(&DropEvent {
                kind: DragKind::Stage,
                draggable_id: "lost".to_string(),
                source: DropTarget {
                    droppable_id: "board".to_string(),
                    index: 5,
                },
                destination: Some(DropTarget {
                    droppable_id: "board".to_string(),
                    index: 0,
                }),
            })
            .unwrap();
        assert_eq!(action, DropAction::ReorderLanes { from: 5, to: 0 });
    }

    #[test]
    fn test_stage_drop_same_index_is_noop() {
        let board = board_with(vec![]);
        let action = board
            .resolve_drop(&DropEvent {
                kind: DragKind::Stage,
                draggable_id: "lost".to_string(),
                source: DropTarget {
                    droppable_id: "board".to_string(),
                    index: 3,
                },
                destination: Some(DropTarget {
                    droppable_id: "board".to_string(),
                    index: 3,
                }),
            })
            .unwrap();
        assert_eq!(action, DropAction::None);
    }
}
