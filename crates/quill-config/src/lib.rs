//! Configuration loading for the quill blog renderer.
//!
//! Options are typically loaded from a `quill.toml` (or `.json`) file and
//! merged with CLI arguments by the binary. Unknown embed-transform names
//! are rejected by the binary before any document is rendered, so
//! configuration mistakes fail fast instead of surfacing mid-build.
mod config;
mod error;

pub use config::{Config, HighlightConfig, ReaderConfig};
pub use error::ConfigError;
