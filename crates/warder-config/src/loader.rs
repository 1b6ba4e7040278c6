//! Loading of gate configuration documents from disk.

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::model::GateConfig;

/// Load a [`GateConfig`] from a JSON document on disk.
///
/// Loading only parses the document; compiling it into enforceable rules
/// (and thereby validating it) is [`GateConfig::compile`]'s job, so a
/// caller can inspect or merge documents before committing to one.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read and
/// [`ConfigError::Parse`] when it is not a valid configuration document.
pub fn from_json_file(path: &Path) -> ConfigResult<GateConfig> {
    let raw = fs::read_to_string(path).map_err(|err| ConfigError::Io {
        path: path.display().to_string(),
        source: err,
    })?;
    serde_json::from_str(&raw).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        source: err,
    })
}
