//! Data Model: Lead, TrialRegistration, FunnelStage
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stage id every new lead starts in. Also the reassignment target when an
/// editable stage is deleted. Never deletable itself.
pub const PENDING_STAGE: &str = "pending";

/// A trial-class registration tracked through the sales funnel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    /// Age in years. The 3-100 bounds are a store-side check constraint,
    /// not validated here.
    pub age: u8,
    /// Weekday of the preferred class (ex: "tuesday")
    pub class_day: String,
    /// Time slot of the preferred class (ex: "18:30")
    pub class_time: String,
    pub class_name: String,
    /// Optional concrete date picked on the form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_date: Option<NaiveDate>,
    /// Funnel stage id. Mutated only via status updates from the board.
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Payload submitted by the public trial-class form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRegistration {
    pub full_name: String,
    pub phone: String,
    pub age: u8,
    pub class_day: String,
    pub class_time: String,
    pub class_name: String,
    #[serde(default)]
    pub specific_date: Option<NaiveDate>,
}

impl TrialRegistration {
    /// Materialize the registration as a pending lead. The in-memory store
    /// uses this directly; the HTTP store lets the remote database assign
    /// id and creation timestamp instead.
    pub fn into_lead(self) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            full_name: self.full_name,
            phone: self.phone,
            age: self.age,
            class_day: self.class_day,
            class_time: self.class_time,
            class_name: self.class_name,
            specific_date: self.specific_date,
            status: PENDING_STAGE.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// One lane of the kanban funnel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelStage {
    /// Slug identifier derived from the title (ex: "waiting-list")
    pub id: String,
    pub title: String,
    /// Color token the board uses for the lane header (ex: "emerald")
    pub color: String,
    /// Sort position. Unique and dense across the registry.
    pub order: u32,
    /// User-created stages can be deleted; the seeded defaults cannot.
    pub editable: bool,
}
