//! Lead cache: the ordered in-memory collection behind the board
use leadboard_core::{FunnelError, Lead};
use uuid::Uuid;

/// All leads, newest first, loaded once from the store. Status changes are
/// patched in place after the remote update succeeds so the board never
/// needs a full reload mid-session.
#[derive(Debug, Clone, Default)]
pub struct LeadCache {
    leads: Vec<Lead>,
}

impl LeadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole cache, e.g. on initial load or manual refresh.
    /// Input is expected in creation-descending order (the store query
    /// sorts server-side).
    pub fn replace(&mut self, leads: Vec<Lead>) {
        self.leads = leads;
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == id)
    }

    /// Prepend a freshly stored lead (newest first).
    pub fn insert(&mut self, lead: Lead) {
        self.leads.insert(0, lead);
    }

    /// Patch one lead's status in place.
    pub fn patch_status(&mut self, id: Uuid, status: &str) -> Result<(), FunnelError> {
        let lead = self
            .leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(FunnelError::LeadNotFound(id))?;
        lead.status = status.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use leadboard_core::PENDING_STAGE;

    fn lead(name: &str) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            phone: "555-0100".to_string(),
            age: 30,
            class_day: "friday".to_string(),
            class_time: "07:00".to_string(),
            class_name: "Morning Yoga".to_string(),
            specific_date: None,
            status: PENDING_STAGE.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_prepends() {
        let mut cache = LeadCache::new();
        cache.replace(vec![lead("older")]);
        cache.insert(lead("newer"));
        assert_eq!(cache.leads()[0].full_name, "newer");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_patch_status_touches_one_lead() {
        let a = lead("a");
        let b = lead("b");
        let mut cache = LeadCache::new();
        cache.replace(vec![a.clone(), b.clone()]);

        cache.patch_status(b.id, "contacted").unwrap();
        assert_eq!(cache.get(a.id).unwrap().status, PENDING_STAGE);
        assert_eq!(cache.get(b.id).unwrap().status, "contacted");
    }

    #[test]
    fn test_patch_unknown_lead() {
        let mut cache = LeadCache::new();
        let err = cache.patch_status(Uuid::new_v4(), "contacted").unwrap_err();
        assert!(matches!(err, FunnelError::LeadNotFound(_)));
    }
}
