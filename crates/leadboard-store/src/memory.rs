//! In-memory store for tests and keyless local runs
use async_trait::async_trait;
use leadboard_core::{FunnelError, Lead, TrialRegistration};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::LeadStore;

/// Drop-in replacement for the remote table. Emulates the store-side age
/// check constraint so the "bounds are enforced by the store" invariant
/// has a local stand-in.
#[derive(Default)]
pub struct MemoryStore {
    leads: Mutex<Vec<Lead>>,
    fail_updates: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leads(leads: Vec<Lead>) -> Self {
        Self {
            leads: Mutex::new(leads),
            fail_updates: AtomicBool::new(false),
        }
    }

    /// Make subsequent `update_status` calls fail, so tests can exercise
    /// the remote-failure path.
    pub fn fail_updates(&self, on: bool) {
        self.fail_updates.store(on, Ordering::SeqCst);
    }
}

#[async_trait]
impl LeadStore for MemoryStore {
    async fn insert(&self, registration: TrialRegistration) -> Result<Lead, FunnelError> {
        if !(3..=100).contains(&registration.age) {
            return Err(FunnelError::Store(format!(
                "new row violates check constraint \"trial_registrations_age_check\" (age={})",
                registration.age
            )));
        }
        let lead = registration.into_lead();
        self.leads.lock().unwrap().push(lead.clone());
        Ok(lead)
    }

    async fn list(&self) -> Result<Vec<Lead>, FunnelError> {
        let mut leads = self.leads.lock().unwrap().clone();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    async fn update_status(&self, id: Uuid, status: &str) -> Result<(), FunnelError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(FunnelError::Store("connection refused".to_string()));
        }
        let mut leads = self.leads.lock().unwrap();
        let lead = leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(FunnelError::LeadNotFound(id))?;
        lead.status = status.to_string();
        Ok(())
    }
}
