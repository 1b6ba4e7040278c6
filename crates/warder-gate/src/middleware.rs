//! Shared gate state and the orchestrating axum middleware.

use std::sync::{Arc, RwLock};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;
use warder_config::{ConfigResult, GateConfig, GateRules};

use crate::challenge::{BasicChallenge, CREDENTIALS_ABSENT, ChallengeEntryPoint};
use crate::context::RequestContext;
use crate::decision::{Decision, decide};
use crate::metrics::GateMetrics;

/// Process-wide gate state: the compiled rules, the challenge entry-point,
/// and an optional metrics handle.
///
/// Rules are replaced wholesale and atomically; in-flight requests keep the
/// `Arc` they cloned and never observe a partially rebuilt set. No request
/// path mutates the state.
pub struct GateState {
    rules: RwLock<Arc<GateRules>>,
    entry_point: Arc<dyn ChallengeEntryPoint>,
    metrics: Option<GateMetrics>,
}

impl GateState {
    /// Gate over the given rules, answering challenges with the bundled
    /// [`BasicChallenge`] writer for the configured realm.
    #[must_use]
    pub fn new(rules: GateRules) -> Self {
        let entry_point = Arc::new(BasicChallenge::new(rules.realm.clone()));
        Self {
            rules: RwLock::new(Arc::new(rules)),
            entry_point,
            metrics: None,
        }
    }

    /// Substitute the collaborator that writes challenge responses.
    #[must_use]
    pub fn with_entry_point(mut self, entry_point: Arc<dyn ChallengeEntryPoint>) -> Self {
        self.entry_point = entry_point;
        self
    }

    /// Attach a metrics handle; every decision is counted against it.
    #[must_use]
    pub fn with_metrics(mut self, metrics: GateMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Current rules snapshot.
    #[must_use]
    pub fn rules(&self) -> Arc<GateRules> {
        match self.rules.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => {
                warn!("gate rules lock poisoned, using last written set");
                Arc::clone(&poisoned.into_inner())
            }
        }
    }

    /// Replace the rules wholesale.
    pub fn replace(&self, rules: GateRules) {
        let rules = Arc::new(rules);
        match self.rules.write() {
            Ok(mut guard) => *guard = rules,
            Err(poisoned) => {
                warn!("gate rules lock poisoned, replacing anyway");
                *poisoned.into_inner() = rules;
            }
        }
    }

    /// Compile a configuration document and swap it in.
    ///
    /// # Errors
    ///
    /// Returns the compilation error without touching the active rules, so
    /// a rejected reconfiguration leaves the previous set in effect.
    pub fn apply(&self, config: &GateConfig) -> ConfigResult<()> {
        let rules = config.compile()?;
        self.replace(rules);
        Ok(())
    }

    /// Metrics handle, when one was attached.
    #[must_use]
    pub fn metrics(&self) -> Option<&GateMetrics> {
        self.metrics.as_ref()
    }
}

/// Middleware running the gate in front of the rest of the chain.
///
/// A challenge decision is answered by the entry-point and the chain
/// halts. Every other decision forwards the request with the [`Decision`]
/// recorded as a request extension, so the verification middleware (or any
/// later stage) can see which path selected it.
pub async fn challenge_gate(
    State(state): State<Arc<GateState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let rules = state.rules();
    let decision;
    let challenge = {
        let ctx = RequestContext::from_request(&req, &rules.client_header);
        decision = decide(&rules, &ctx);
        match decision {
            Decision::Challenge => Some(state.entry_point.commence(&ctx, &CREDENTIALS_ABSENT)),
            _ => None,
        }
    };

    if let Some(metrics) = state.metrics() {
        metrics.record_decision(decision);
    }

    match challenge {
        Some(response) => response,
        None => {
            req.extensions_mut().insert(decision);
            next.run(req).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warder_config::ConfigError;

    fn state(patterns: &[&str]) -> GateState {
        let config = GateConfig {
            client_patterns: patterns.iter().map(ToString::to_string).collect(),
            ..GateConfig::default()
        };
        GateState::new(config.compile().expect("rules compile"))
    }

    #[test]
    fn apply_swaps_the_whole_set() {
        let state = state(&["ArcGIS.*"]);
        let next = GateConfig {
            client_patterns: vec!["curl/.*".to_string()],
            ..GateConfig::default()
        };
        state.apply(&next).expect("valid reconfiguration");

        let rules = state.rules();
        assert_eq!(rules.patterns.first_match("ArcGIS Client"), None);
        assert_eq!(rules.patterns.first_match("curl/8.5.0"), Some("curl/.*"));
    }

    #[test]
    fn rejected_reconfiguration_keeps_previous_rules() {
        let state = state(&["ArcGIS.*"]);
        let broken = GateConfig {
            client_patterns: vec!["(".to_string()],
            ..GateConfig::default()
        };
        let err = state.apply(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));

        let rules = state.rules();
        assert_eq!(
            rules.patterns.first_match("ArcGIS Client"),
            Some("ArcGIS.*")
        );
    }
}
