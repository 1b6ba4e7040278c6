//! Operator-facing configuration document and its compiled form.

use http::HeaderName;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::patterns::ClientPatterns;

/// Header the gate classifies by when none is configured.
pub const DEFAULT_CLIENT_HEADER: &str = "user-agent";

/// Realm the bundled challenge writer advertises when none is configured.
pub const DEFAULT_REALM: &str = "warder";

/// Gate configuration as written by the operator.
///
/// This is the serde-facing document; nothing in it is trusted until
/// [`GateConfig::compile`] has turned it into [`GateRules`]. An invalid
/// document is rejected in full at that point, never silently trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Ordered regular expressions recognizing non-browser clients by
    /// their identifying header. Evaluated as full-string matches.
    pub client_patterns: Vec<String>,
    /// Keep the gate active on plain-HTTP requests. Off by default so the
    /// challenge never invites credentials over cleartext; deployments
    /// behind a TLS-terminating balancer opt in explicitly.
    pub ignore_https: bool,
    /// Name of the identifying header to classify by.
    pub client_header: String,
    /// Realm advertised by the bundled challenge response.
    pub realm: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            client_patterns: Vec::new(),
            ignore_https: false,
            client_header: DEFAULT_CLIENT_HEADER.to_string(),
            realm: DEFAULT_REALM.to_string(),
        }
    }
}

impl GateConfig {
    /// Compile the document into the immutable form the gate evaluates.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered: an uncompilable
    /// pattern, a malformed header name, or an unusable realm. A failed
    /// compile produces nothing; callers holding an older `GateRules`
    /// keep it.
    pub fn compile(&self) -> ConfigResult<GateRules> {
        let patterns = ClientPatterns::compile(&self.client_patterns)?;
        let client_header = HeaderName::from_bytes(self.client_header.as_bytes()).map_err(
            |err| ConfigError::InvalidClientHeader {
                name: self.client_header.clone(),
                source: err,
            },
        )?;
        validate_realm(&self.realm)?;
        Ok(GateRules {
            patterns,
            ignore_https: self.ignore_https,
            client_header,
            realm: self.realm.clone(),
        })
    }
}

/// Compiled, immutable gate configuration.
///
/// Built once per (re)configuration and shared read-only across in-flight
/// requests. Reconfiguration replaces the whole value.
#[derive(Debug, Clone)]
pub struct GateRules {
    /// Compiled classifier patterns, in configured order.
    pub patterns: ClientPatterns,
    /// Whether the transport scheme is consulted at all.
    pub ignore_https: bool,
    /// Parsed identifying-header name.
    pub client_header: HeaderName,
    /// Realm for the bundled challenge response.
    pub realm: String,
}

/// The realm is embedded in a quoted `WWW-Authenticate` parameter, so it
/// must stay within visible ASCII and free of quotes and backslashes.
fn validate_realm(realm: &str) -> ConfigResult<()> {
    if realm.is_empty() {
        return Err(ConfigError::InvalidRealm {
            realm: realm.to_string(),
            reason: "must not be empty",
        });
    }
    if !realm
        .bytes()
        .all(|byte| (b' '..=b'~').contains(&byte) && byte != b'"' && byte != b'\\')
    {
        return Err(ConfigError::InvalidRealm {
            realm: realm.to_string(),
            reason: "must be printable ASCII without quotes or backslashes",
        });
    }
    Ok(())
}
