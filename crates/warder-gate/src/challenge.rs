//! The challenge entry-point seam and its bundled implementation.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::context::RequestContext;

/// Signal handed to the entry-point when an uncredentialed, recognized
/// client must be prompted.
///
/// The message is fixed and carried by the type itself; the gate never
/// synthesizes request-specific failure detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("No basic authentication credentials provided")]
pub struct CredentialsAbsent;

/// The one value of [`CredentialsAbsent`] the gate ever emits.
pub const CREDENTIALS_ABSENT: CredentialsAbsent = CredentialsAbsent;

/// Collaborator that produces the actual challenge response.
///
/// The gate decides *that* a challenge is due; the entry-point decides what
/// the response looks like. Implementations must answer with a 401-class
/// status and an appropriate challenge header.
pub trait ChallengeEntryPoint: Send + Sync {
    /// Produce the challenge response for a request the gate stopped.
    fn commence(&self, ctx: &RequestContext<'_>, reason: &CredentialsAbsent) -> Response;
}

/// Bundled entry-point answering `401` with a `WWW-Authenticate: Basic`
/// header and the signal's message as a plain-text body.
#[derive(Debug, Clone)]
pub struct BasicChallenge {
    realm: String,
}

impl BasicChallenge {
    /// Challenge writer advertising the given realm. The realm has already
    /// been vetted at configuration time to be safe inside a quoted
    /// parameter.
    #[must_use]
    pub fn new(realm: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
        }
    }

    /// Realm this writer advertises.
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }
}

impl ChallengeEntryPoint for BasicChallenge {
    fn commence(&self, _ctx: &RequestContext<'_>, reason: &CredentialsAbsent) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(
                header::WWW_AUTHENTICATE,
                format!("Basic realm=\"{}\"", self.realm),
            )],
            reason.to_string(),
        )
            .into_response()
    }
}
