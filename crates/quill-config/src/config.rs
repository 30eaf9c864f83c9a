use std::{
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// Default-value functions rather than literals: serde's `default` attribute
// wants something callable, and a few of these construct owned values.
fn default_output_dir() -> PathBuf {
  PathBuf::from("build")
}

fn default_title() -> String {
  "A quill blog".to_string()
}

fn default_footer_text() -> String {
  "Generated with quill".to_string()
}

fn default_transforms() -> Vec<String> {
  vec![
    "youtube".to_string(),
    "gist".to_string(),
    "vimeo".to_string(),
    "github-commit".to_string(),
  ]
}

const fn default_true() -> bool {
  true
}

/// Configuration options for quill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Site title, used by templates.
  pub title: String,

  /// Input directory containing post source files.
  pub input_dir: Option<PathBuf>,

  /// Output directory for generated HTML.
  pub output_dir: PathBuf,

  /// Number of threads to use for parallel rendering.
  pub jobs: Option<usize>,

  /// Text to be inserted in the footer.
  pub footer_text: String,

  /// Rendering options for the post reader.
  pub reader: ReaderConfig,

  /// Syntax highlighting options.
  pub highlight: HighlightConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      title:       default_title(),
      input_dir:   None,
      output_dir:  default_output_dir(),
      jobs:        None,
      footer_text: default_footer_text(),
      reader:      ReaderConfig::default(),
      highlight:   HighlightConfig::default(),
    }
  }
}

/// Options consumed by the post rendering pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
  /// Ordered embed-transform names. Unknown names are rejected before any
  /// document is rendered.
  pub transforms: Vec<String>,

  /// Prefix TOC labels of numbered headings with their section number.
  pub toc_auto_number: bool,

  /// Prefix for generated heading IDs. Empty means none.
  pub heading_id_prefix: String,
}

impl Default for ReaderConfig {
  fn default() -> Self {
    Self {
      transforms:        default_transforms(),
      toc_auto_number:   false,
      heading_id_prefix: String::new(),
    }
  }
}

/// Options consumed by the syntax highlighting collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
  /// Whether to highlight fenced code blocks at all.
  pub enable: bool,

  /// Theme name; backend default when unset.
  pub theme: Option<String>,

  /// Emit inline style attributes instead of CSS classes.
  pub inline: bool,

  /// Prefix every code line with a line number.
  pub line_numbers: bool,
}

impl Default for HighlightConfig {
  fn default() -> Self {
    Self {
      enable:       default_true(),
      theme:        None,
      inline:       false,
      line_numbers: false,
    }
  }
}

/// Template for `quill init`. Kept as literal TOML so the generated file
/// carries its own documentation.
const DEFAULT_CONFIG_TOML: &str = r##"# quill configuration

# Site title, used by templates.
title = "A quill blog"

# Directory containing post source files.
input_dir = "posts"

# Output directory for generated HTML.
output_dir = "build"

# Text to be inserted in the footer.
footer_text = "Generated with quill"

[reader]
# Embed transforms applied to post bodies, in order.
transforms = ["youtube", "gist", "vimeo", "github-commit"]
# Prefix TOC labels with section numbers ("1.2 Title").
toc_auto_number = false
# Prefix for generated heading anchors, e.g. "post" -> id="post-1-intro".
heading_id_prefix = ""

[highlight]
# Highlight fenced code blocks.
enable = true
# Emit inline style attributes instead of CSS classes.
inline = false
# Prefix code lines with line numbers.
line_numbers = false
"##;

impl Config {
  /// Load configuration from a file.
  /// Only TOML and JSON are supported for the time being.
  ///
  /// # Errors
  ///
  /// Returns a [`ConfigError`] when the file cannot be read, has no or an
  /// unsupported extension, or fails to parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .ok_or_else(|| ConfigError::NoExtension(path.to_path_buf()))?;

    match extension.to_lowercase().as_str() {
      "toml" => Ok(toml::from_str(&content)?),
      "json" => Ok(serde_json::from_str(&content)?),
      _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
  }

  /// Look for a config file in the standard locations.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    ["quill.toml", "quill.json"]
      .iter()
      .map(PathBuf::from)
      .find(|candidate| candidate.exists())
  }

  /// Load configuration from an explicit file, a discovered file, or
  /// defaults, in that order of preference.
  ///
  /// # Errors
  ///
  /// Returns a [`ConfigError`] when an explicit or discovered file fails
  /// to load.
  pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      return Self::from_file(path);
    }

    if let Some(discovered) = Self::find_config_file() {
      log::info!("Using discovered config file: {}", discovered.display());
      return Self::from_file(&discovered);
    }

    Ok(Self::default())
  }

  /// Write a documented default configuration file.
  ///
  /// # Errors
  ///
  /// Returns a [`ConfigError`] when the target exists (without `force`) or
  /// cannot be written.
  pub fn generate_default_config(
    format: &str,
    output: &Path,
    force: bool,
  ) -> Result<(), ConfigError> {
    if output.exists() && !force {
      return Err(ConfigError::AlreadyExists(output.to_path_buf()));
    }

    let content = if format.eq_ignore_ascii_case("json") {
      serde_json::to_string_pretty(&Self::default())?
    } else {
      DEFAULT_CONFIG_TOML.to_string()
    };

    fs::write(output, content)?;
    log::info!("Wrote default configuration to {}", output.display());
    Ok(())
  }

  /// The heading-ID prefix as the renderer wants it: `None` when empty.
  #[must_use]
  pub fn heading_id_prefix(&self) -> Option<&str> {
    let prefix = self.reader.heading_id_prefix.trim();
    if prefix.is_empty() { None } else { Some(prefix) }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_carry_the_standard_chain() {
    let config = Config::default();
    assert_eq!(config.reader.transforms, [
      "youtube",
      "gist",
      "vimeo",
      "github-commit"
    ]);
    assert!(!config.reader.toc_auto_number);
    assert!(config.highlight.enable);
    assert_eq!(config.output_dir, PathBuf::from("build"));
  }

  #[test]
  fn partial_toml_fills_in_defaults() {
    let config: Config = toml::from_str(
      r#"
title = "Test Blog"

[reader]
toc_auto_number = true
"#,
    )
    .expect("valid TOML");

    assert_eq!(config.title, "Test Blog");
    assert!(config.reader.toc_auto_number);
    // Untouched sections keep their defaults.
    assert_eq!(config.reader.transforms.len(), 4);
    assert!(config.highlight.enable);
  }

  #[test]
  fn embedded_default_template_parses_back() {
    let config: Config =
      toml::from_str(DEFAULT_CONFIG_TOML).expect("template must stay valid");
    assert_eq!(config.title, Config::default().title);
    assert_eq!(config.reader.transforms, Config::default().reader.transforms);
  }

  #[test]
  fn from_file_dispatches_on_extension() {
    let dir = tempfile::tempdir().expect("tempdir");

    let toml_path = dir.path().join("quill.toml");
    fs::write(&toml_path, "title = \"From TOML\"").expect("write");
    let config = Config::from_file(&toml_path).expect("load toml");
    assert_eq!(config.title, "From TOML");

    let json_path = dir.path().join("quill.json");
    fs::write(&json_path, r#"{"title": "From JSON"}"#).expect("write");
    let config = Config::from_file(&json_path).expect("load json");
    assert_eq!(config.title, "From JSON");

    let odd_path = dir.path().join("quill.yaml");
    fs::write(&odd_path, "title: nope").expect("write");
    assert!(matches!(
      Config::from_file(&odd_path),
      Err(ConfigError::UnsupportedFormat(_))
    ));
  }

  #[test]
  fn generate_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("quill.toml");

    Config::generate_default_config("toml", &path, false).expect("first write");
    assert!(matches!(
      Config::generate_default_config("toml", &path, false),
      Err(ConfigError::AlreadyExists(_))
    ));
    Config::generate_default_config("toml", &path, true)
      .expect("forced overwrite");
  }

  #[test]
  fn empty_prefix_maps_to_none() {
    let mut config = Config::default();
    assert_eq!(config.heading_id_prefix(), None);
    config.reader.heading_id_prefix = "post".to_string();
    assert_eq!(config.heading_id_prefix(), Some("post"));
  }
}
