//! Demo composition: the gate in front of a stubbed verification path and
//! a stubbed SSO redirect.
//!
//! Run with `cargo run -p warder-gate --example sso_front`, then compare:
//!
//! ```text
//! curl -H 'x-forwarded-proto: https' http://127.0.0.1:3000/wms
//! curl -H 'x-forwarded-proto: https' -u user:pass http://127.0.0.1:3000/wms
//! curl -H 'x-forwarded-proto: https' -A 'Mozilla/5.0' http://127.0.0.1:3000/wms
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::response::{IntoResponse, Redirect};
use axum::routing::get;
use axum::{Extension, Router, middleware};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use warder_gate::{Decision, GateConfig, GateMetrics, GateState, challenge_gate};

/// Stand-in for the protected service plus the verification and SSO
/// collaborators further down a real chain.
async fn wms(Extension(decision): Extension<Decision>) -> axum::response::Response {
    match decision {
        // A real chain would verify the credential against the identity
        // store here.
        Decision::Credentialed => "map tiles for a verified client\n".into_response(),
        // Browsers end up at the SSO login.
        Decision::PassThrough | Decision::Exempt => Redirect::temporary("/login").into_response(),
        // Challenges never reach the chain.
        Decision::Challenge => unreachable!("challenged requests are answered by the gate"),
    }
}

async fn login() -> &'static str {
    "pretend single-sign-on login page\n"
}

async fn metrics(Extension(metrics): Extension<GateMetrics>) -> String {
    metrics.encode_text().unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let config = GateConfig {
        client_patterns: vec![
            "ArcGIS.*".to_string(),
            ".*QGIS.*".to_string(),
            "curl/.*".to_string(),
        ],
        ..GateConfig::default()
    };
    let gate_metrics = GateMetrics::new()?;
    let state = Arc::new(GateState::new(config.compile()?).with_metrics(gate_metrics.clone()));

    let app = Router::new()
        .route("/wms", get(wms))
        .layer(middleware::from_fn_with_state(state, challenge_gate))
        .route("/login", get(login))
        .route("/metrics", get(metrics))
        .layer(Extension(gate_metrics))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!("demo listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
