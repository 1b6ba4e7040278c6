#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Configuration surface for the Warder challenge gate.
//!
//! Layout: `model.rs` (the operator-facing `GateConfig` document and its
//! compiled `GateRules` form), `patterns.rs` (the ordered client-pattern
//! set), `loader.rs` (file loading), `error.rs` (error types).
//!
//! Validation is eager: a configuration either compiles in full at startup
//! or is rejected in full. Nothing here is consulted again at request time
//! except the already-compiled `GateRules` value.

pub mod error;
pub mod loader;
pub mod model;
pub mod patterns;

pub use error::{ConfigError, ConfigResult};
pub use loader::from_json_file;
pub use model::{DEFAULT_CLIENT_HEADER, DEFAULT_REALM, GateConfig, GateRules};
pub use patterns::ClientPatterns;
