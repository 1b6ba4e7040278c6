//! The per-request decision pipeline.

use tracing::debug;
use warder_config::{ClientPatterns, GateRules};

use crate::context::RequestContext;

/// Literal scheme token the credential inspector looks for. Case-sensitive,
/// single trailing space, exactly as clients send it preemptively.
const BASIC_PREFIX: &str = "Basic ";

/// Outcome of evaluating one request against the gate.
///
/// A decision exists only for the duration of one request's handling; the
/// middleware additionally records it as a request extension so downstream
/// stages can tell which path selected them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Plain-HTTP request outside the gate's remit; forward unchanged.
    Exempt,
    /// A `Basic` credential is already present; hand the request to the
    /// verification path without classifying.
    Credentialed,
    /// Uncredentialed request from a recognized non-browser client; the
    /// challenge entry-point answers and the chain halts.
    Challenge,
    /// Nothing matched; the rest of the chain (ultimately the browser SSO
    /// redirect) handles the request.
    PassThrough,
}

impl Decision {
    /// Machine-friendly discriminator for metrics labels and headers.
    #[must_use]
    pub const fn outcome(self) -> &'static str {
        match self {
            Self::Exempt => "exempt",
            Self::Credentialed => "credentialed",
            Self::Challenge => "challenge",
            Self::PassThrough => "pass_through",
        }
    }
}

/// Evaluate one request against the compiled rules.
///
/// Pure and synchronous: same context and rules, same decision. Absent
/// headers are ordinary inputs here, not errors.
#[must_use]
pub fn decide(rules: &GateRules, ctx: &RequestContext<'_>) -> Decision {
    if transport_exempt(ctx.scheme(), rules.ignore_https) {
        debug!(scheme = ctx.scheme(), "not on https, gate skipped");
        return Decision::Exempt;
    }

    if has_basic_credentials(ctx.authorization()) {
        debug!("authorization header present, handing to verification");
        return Decision::Credentialed;
    }

    match classify(&rules.patterns, ctx.client_id()) {
        Some(pattern) => {
            debug!(
                client = ctx.client_id().unwrap_or(""),
                pattern, "client recognized, issuing basic challenge"
            );
            Decision::Challenge
        }
        None => {
            debug!("client not recognized, forwarding");
            Decision::PassThrough
        }
    }
}

/// Whether the transport takes the request out of the gate's remit.
///
/// With `ignore_https` set the scheme is never consulted; otherwise a
/// non-HTTPS request is exempt so the challenge never invites credentials
/// over cleartext.
fn transport_exempt(scheme: &str, ignore_https: bool) -> bool {
    !ignore_https && !scheme.eq_ignore_ascii_case("https")
}

/// Whether the request already carries a syntactically plausible `Basic`
/// credential. Payload validation belongs to the verification path; only
/// the scheme token is inspected here.
fn has_basic_credentials(authorization: Option<&str>) -> bool {
    authorization.is_some_and(|value| value.starts_with(BASIC_PREFIX))
}

/// First configured pattern matching the whole identifying-header value.
/// An absent header never matches.
fn classify<'r>(patterns: &'r ClientPatterns, client_id: Option<&str>) -> Option<&'r str> {
    client_id.and_then(|value| patterns.first_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use warder_config::GateConfig;

    fn rules(patterns: &[&str], ignore_https: bool) -> GateRules {
        GateConfig {
            client_patterns: patterns.iter().map(ToString::to_string).collect(),
            ignore_https,
            ..GateConfig::default()
        }
        .compile()
        .expect("rules should compile")
    }

    #[test]
    fn plain_http_is_exempt_before_anything_else() {
        let rules = rules(&["ArcGIS.*"], false);
        let ctx = RequestContext::new("http", None, Some("ArcGIS Client"));
        assert_eq!(decide(&rules, &ctx), Decision::Exempt);
    }

    #[test]
    fn scheme_comparison_ignores_case() {
        let rules = rules(&[], false);
        let ctx = RequestContext::new("HTTPS", None, None);
        assert_eq!(decide(&rules, &ctx), Decision::PassThrough);
    }

    #[test]
    fn ignore_https_keeps_the_gate_active_on_http() {
        let rules = rules(&["ArcGIS.*"], true);
        let ctx = RequestContext::new("http", None, Some("ArcGIS Client"));
        assert_eq!(decide(&rules, &ctx), Decision::Challenge);
    }

    #[test]
    fn recognized_client_without_credentials_is_challenged() {
        let rules = rules(&["ArcGIS.*"], false);
        let ctx = RequestContext::new("https", None, Some("ArcGIS Client"));
        assert_eq!(decide(&rules, &ctx), Decision::Challenge);
    }

    #[test]
    fn presented_credential_skips_classification() {
        let rules = rules(&["ArcGIS.*"], false);
        let ctx = RequestContext::new("https", Some("Basic dXNlcjpwYXNz"), Some("ArcGIS Client"));
        assert_eq!(decide(&rules, &ctx), Decision::Credentialed);
    }

    #[test]
    fn basic_token_is_case_and_space_sensitive() {
        let rules = rules(&["ArcGIS.*"], false);
        for authorization in ["basic dXNlcjpwYXNz", "BasicdXNlcjpwYXNz", "Bearer abc"] {
            let ctx = RequestContext::new("https", Some(authorization), Some("ArcGIS Client"));
            assert_eq!(decide(&rules, &ctx), Decision::Challenge, "{authorization}");
        }
    }

    #[test]
    fn absent_identifying_header_never_matches() {
        let rules = rules(&["curl.*", ".*"], false);
        let ctx = RequestContext::new("https", None, None);
        assert_eq!(decide(&rules, &ctx), Decision::PassThrough);
    }

    #[test]
    fn unrecognized_client_passes_through() {
        let rules = rules(&["curl.*"], false);
        let ctx = RequestContext::new("https", None, Some("Mozilla/5.0"));
        assert_eq!(decide(&rules, &ctx), Decision::PassThrough);
    }

    #[test]
    fn classification_is_full_string() {
        let rules = rules(&["QGIS.*"], false);
        let ctx = RequestContext::new("https", None, Some("MyQGISClient/1.0"));
        assert_eq!(decide(&rules, &ctx), Decision::PassThrough);
    }

    #[test]
    fn same_input_same_decision() {
        let rules = rules(&["QGIS.*"], false);
        let ctx = RequestContext::new("https", None, Some("QGIS 3.34"));
        let first = decide(&rules, &ctx);
        let second = decide(&rules, &ctx);
        assert_eq!(first, Decision::Challenge);
        assert_eq!(first, second);
    }
}
