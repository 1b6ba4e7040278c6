//! Ordered, compiled client-pattern set.

use regex::Regex;

use crate::error::{ConfigError, ConfigResult};

/// A single compiled classifier pattern.
///
/// The source string is kept alongside the compiled form so a match can be
/// reported in logs exactly as the operator wrote it.
#[derive(Debug, Clone)]
struct ClientPattern {
    source: String,
    regex: Regex,
}

/// Ordered set of compiled patterns recognizing non-browser clients.
///
/// Matching is full-string: each source pattern is compiled anchored at
/// both ends, so `QGIS.*` recognizes `QGIS 3.34` but not
/// `MyQGISClient/1.0`. A pattern meant to match anywhere inside the header
/// value must say so itself (`.*QGIS.*`). Order decides which pattern is
/// reported as the match; any match yields the same outcome.
///
/// The set is built wholesale and never mutated afterwards; replacing a
/// configuration means compiling a fresh set.
#[derive(Debug, Clone, Default)]
pub struct ClientPatterns {
    patterns: Vec<ClientPattern>,
}

impl ClientPatterns {
    /// Compile an ordered list of pattern sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for the first source that
    /// fails to compile; no partially built set is ever produced.
    pub fn compile(sources: &[String]) -> ConfigResult<Self> {
        let mut patterns = Vec::with_capacity(sources.len());
        for source in sources {
            let regex = Regex::new(&format!("^(?:{source})$")).map_err(|err| {
                ConfigError::InvalidPattern {
                    pattern: source.clone(),
                    source: err,
                }
            })?;
            patterns.push(ClientPattern {
                source: source.clone(),
                regex,
            });
        }
        Ok(Self { patterns })
    }

    /// Return the source of the first pattern matching the whole of
    /// `value`, if any.
    #[must_use]
    pub fn first_match(&self, value: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|pattern| pattern.regex.is_match(value))
            .map(|pattern| pattern.source.as_str())
    }

    /// Number of patterns in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set is empty (an empty set matches nothing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern sources in configured order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|pattern| pattern.source.as_str())
    }
}
