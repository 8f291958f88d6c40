//! HTTP store client (PostgREST dialect)
use async_trait::async_trait;
use leadboard_core::{FunnelError, Lead, TrialRegistration, PENDING_STAGE};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::LeadStore;

/// Table holding the trial registrations
const TABLE: &str = "trial_registrations";

/// Client for the hosted relational store. Auth is the project API key,
/// sent both as `apikey` and bearer token as the service expects.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Insert body: the form fields plus the default status. Id and creation
/// timestamp are assigned by the database.
#[derive(Serialize)]
struct InsertRow<'a> {
    #[serde(flatten)]
    registration: &'a TrialRegistration,
    status: &'a str,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a store from `LEADBOARD_STORE_URL` / `LEADBOARD_STORE_KEY`.
    /// Returns `Ok(None)` when no URL is configured so the caller can fall
    /// back to the in-memory store.
    pub fn from_env() -> Result<Option<Self>, FunnelError> {
        let Ok(url) = std::env::var("LEADBOARD_STORE_URL") else {
            return Ok(None);
        };
        let key = std::env::var("LEADBOARD_STORE_KEY")
            .map_err(|_| FunnelError::Config("LEADBOARD_STORE_KEY not set".to_string()))?;
        Ok(Some(Self::new(url, key)))
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), TABLE)
    }

    fn request(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Turn a non-2xx response into the single store error the UI banner
    /// will show.
    async fn reject(resp: reqwest::Response) -> FunnelError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let detail: String = body.chars().take(200).collect();
        FunnelError::Store(format!("HTTP_{}: {}", status.as_u16(), detail))
    }
}

#[async_trait]
impl LeadStore for HttpStore {
    async fn insert(&self, registration: TrialRegistration) -> Result<Lead, FunnelError> {
        let row = InsertRow {
            registration: &registration,
            status: PENDING_STAGE,
        };
        let resp = self
            .request(self.client.post(self.endpoint()))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| FunnelError::Store(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        let mut rows: Vec<Lead> = resp
            .json()
            .await
            .map_err(|e| FunnelError::Store(e.to_string()))?;
        rows.pop()
            .ok_or_else(|| FunnelError::Store("empty insert response".to_string()))
    }

    async fn list(&self) -> Result<Vec<Lead>, FunnelError> {
        let url = format!("{}?select=*&order=created_at.desc", self.endpoint());
        let resp = self
            .request(self.client.get(url))
            .send()
            .await
            .map_err(|e| FunnelError::Store(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        resp.json()
            .await
            .map_err(|e| FunnelError::Store(e.to_string()))
    }

    async fn update_status(&self, id: Uuid, status: &str) -> Result<(), FunnelError> {
        let url = format!("{}?id=eq.{}", self.endpoint(), id);
        tracing::debug!(lead = %id, status, "updating lead status");
        let resp = self
            .request(self.client.patch(url))
            .header("Prefer", "return=minimal")
            .json(&json!({ "status": status }))
            .send()
            .await
            .map_err(|e| FunnelError::Store(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Ok(())
    }
}
