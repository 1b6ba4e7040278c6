//! Prometheus counters for gate decisions.
//!
//! Kept optional: the middleware works without a metrics handle, and hosts
//! that already run a registry can register the collectors on their own.

use std::sync::Arc;

use anyhow::Result;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::decision::Decision;

/// Prometheus-backed metrics handle shared by clones.
#[derive(Clone)]
pub struct GateMetrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    decisions_total: IntCounterVec,
}

impl GateMetrics {
    /// Construct a metrics handle with its collectors registered on a
    /// dedicated registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a collector cannot be created or registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let decisions_total = IntCounterVec::new(
            Opts::new("gate_decisions_total", "Gate decisions by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(decisions_total.clone()))?;
        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                decisions_total,
            }),
        })
    }

    /// Count one decision.
    pub fn record_decision(&self, decision: Decision) {
        self.inner
            .decisions_total
            .with_label_values(&[decision.outcome()])
            .inc();
    }

    /// Render the registry in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or produces invalid UTF-8.
    pub fn encode_text(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.inner.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_decisions_by_outcome() {
        let metrics = GateMetrics::new().expect("metrics registry");
        metrics.record_decision(Decision::Challenge);
        metrics.record_decision(Decision::Challenge);
        metrics.record_decision(Decision::PassThrough);

        let rendered = metrics.encode_text().expect("encodes");
        assert!(rendered.contains("gate_decisions_total{outcome=\"challenge\"} 2"));
        assert!(rendered.contains("gate_decisions_total{outcome=\"pass_through\"} 1"));
    }
}
