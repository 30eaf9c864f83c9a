use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading or generating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Config file has no extension: {0}")]
  NoExtension(PathBuf),

  #[error("Unsupported config file format: {0}")]
  UnsupportedFormat(PathBuf),

  #[error("Configuration file already exists: {0}")]
  AlreadyExists(PathBuf),
}
