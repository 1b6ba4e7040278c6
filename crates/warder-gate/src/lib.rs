#![forbid(unsafe_code)]

//! Request-time authentication-mode selector for reverse proxies.
//!
//! Non-interactive clients (desktop GIS tools, scripted consumers) cannot
//! follow the browser SSO redirect the rest of the chain falls back to, but
//! they do speak HTTP Basic. The gate recognizes such clients by their
//! identifying header and short-circuits with a Basic challenge; requests
//! that already carry a `Basic` credential are handed straight to the
//! verification path, and everything else continues down the chain
//! untouched.
//!
//! The per-request pipeline is three stages evaluated in order, cheapest
//! first:
//!
//! 1. transport guard: plain-HTTP requests are left alone entirely unless
//!    the deployment opted in with `ignore_https`;
//! 2. credential inspection: an `Authorization: Basic ...` header means
//!    verification, not classification;
//! 3. client classification: the identifying header is matched full-string
//!    against the configured pattern set.
//!
//! [`decide`] is the pure decision function over a [`RequestContext`];
//! [`challenge_gate`] is the axum middleware that maps decisions onto the
//! chain: forwarding, invoking the [`ChallengeEntryPoint`], or recording a
//! [`Decision`] extension for downstream verification middleware.

pub mod challenge;
pub mod context;
pub mod decision;
pub mod metrics;
pub mod middleware;

pub use challenge::{BasicChallenge, CREDENTIALS_ABSENT, ChallengeEntryPoint, CredentialsAbsent};
pub use context::RequestContext;
pub use decision::{Decision, decide};
pub use metrics::GateMetrics;
pub use middleware::{GateState, challenge_gate};
pub use warder_config::{ClientPatterns, ConfigError, ConfigResult, GateConfig, GateRules};
