//! Prometheus counters for the board API
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub registrations: IntCounter,
    pub lead_moves: IntCounter,
    pub store_failures: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let registrations = IntCounter::new(
            "leadboard_registrations_total",
            "Trial registrations accepted",
        )?;
        let lead_moves =
            IntCounter::new("leadboard_lead_moves_total", "Lead stage changes applied")?;
        let store_failures = IntCounter::new(
            "leadboard_store_failures_total",
            "Remote store calls that failed",
        )?;
        registry.register(Box::new(registrations.clone()))?;
        registry.register(Box::new(lead_moves.clone()))?;
        registry.register(Box::new(store_failures.clone()))?;
        Ok(Self {
            registry,
            registrations,
            lead_moves,
            store_failures,
        })
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
