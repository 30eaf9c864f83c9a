//! Syntax highlighting for fenced code blocks.
//!
//! Highlighting is an external collaborator as far as the rendering
//! pipeline is concerned: the pipeline hands over language and source text
//! and splices whatever HTML comes back. The trait seam keeps the backend
//! swappable; the default backend is syntect.
use std::{collections::HashMap, sync::OnceLock};

use thiserror::Error;

/// Error type for syntax highlighting operations.
#[derive(Debug, Error)]
pub enum SyntaxError {
  /// The backend failed to highlight the given source.
  #[error("Highlighting failed: {0}")]
  HighlightingFailed(String),

  /// No highlighting backend was compiled in.
  #[error("No syntax highlighting backend available")]
  NoBackendAvailable,
}

/// Result type for syntax highlighting operations.
pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Display options handed to the highlighter by the configuration surface.
#[derive(Debug, Clone, Default)]
pub struct HighlightStyle {
  /// Theme name; backend default when `None`.
  pub theme: Option<String>,

  /// Emit inline `style` attributes instead of CSS classes.
  pub inline_styles: bool,

  /// Prefix every code line with a line-number span.
  pub line_numbers: bool,
}

/// A pluggable code highlighter: language plus source text in, HTML out.
pub trait SyntaxHighlighter: Send + Sync {
  /// Backend name, for diagnostics.
  fn name(&self) -> &'static str;

  /// Whether the backend knows the given language token.
  fn supports_language(&self, language: &str) -> bool;

  /// Highlight `code` as `language`, returning the inner HTML for a
  /// `<pre><code>` block (no wrapper element).
  ///
  /// # Errors
  ///
  /// Returns a [`SyntaxError`] when the backend cannot produce output;
  /// callers fall back to the unhighlighted block.
  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String>;
}

/// Common language aliases mapped to tokens the backends know.
fn resolve_alias(language: &str) -> &str {
  static ALIASES: OnceLock<HashMap<&'static str, &'static str>> =
    OnceLock::new();
  let aliases = ALIASES.get_or_init(|| {
    HashMap::from([
      ("js", "javascript"),
      ("ts", "typescript"),
      ("py", "python"),
      ("rb", "ruby"),
      ("sh", "bash"),
      ("shell", "bash"),
      ("yml", "yaml"),
      ("md", "markdown"),
    ])
  });
  aliases.get(language).copied().unwrap_or(language)
}

/// Create the default highlighter for the enabled backend.
///
/// # Errors
///
/// Returns [`SyntaxError::NoBackendAvailable`] when the crate was built
/// without a highlighting backend.
pub fn create_default_highlighter(
  style: HighlightStyle,
) -> SyntaxResult<std::sync::Arc<dyn SyntaxHighlighter>> {
  #[cfg(feature = "syntect")]
  {
    Ok(std::sync::Arc::new(SyntectHighlighter::new(style)))
  }

  #[cfg(not(feature = "syntect"))]
  {
    let _ = style;
    Err(SyntaxError::NoBackendAvailable)
  }
}

/// Syntect-based highlighter using Sublime Text syntax definitions.
#[cfg(feature = "syntect")]
pub struct SyntectHighlighter {
  style: HighlightStyle,
}

#[cfg(feature = "syntect")]
impl SyntectHighlighter {
  /// Fallback theme guaranteed to exist in syntect's default theme set.
  const FALLBACK_THEME: &'static str = "InspiredGitHub";

  /// Create a highlighter with the given display options.
  #[must_use]
  pub const fn new(style: HighlightStyle) -> Self {
    Self { style }
  }

  fn syntax_set() -> &'static syntect::parsing::SyntaxSet {
    static SYNTAX_SET: OnceLock<syntect::parsing::SyntaxSet> = OnceLock::new();
    SYNTAX_SET
      .get_or_init(syntect::parsing::SyntaxSet::load_defaults_newlines)
  }

  fn theme(&self) -> &'static syntect::highlighting::Theme {
    static THEME_SET: OnceLock<syntect::highlighting::ThemeSet> =
      OnceLock::new();
    let themes =
      THEME_SET.get_or_init(syntect::highlighting::ThemeSet::load_defaults);

    let name = self.style.theme.as_deref().unwrap_or(Self::FALLBACK_THEME);
    themes.themes.get(name).unwrap_or_else(|| {
      if name != Self::FALLBACK_THEME {
        log::warn!("unknown highlight theme {name:?}, using fallback");
      }
      &themes.themes[Self::FALLBACK_THEME]
    })
  }

  fn highlight_inline(
    &self,
    code: &str,
    syntax: &syntect::parsing::SyntaxReference,
  ) -> SyntaxResult<String> {
    use syntect::{
      easy::HighlightLines,
      html::{IncludeBackground, styled_line_to_highlighted_html},
      util::LinesWithEndings,
    };

    let mut lines = HighlightLines::new(syntax, self.theme());
    let mut html = String::with_capacity(code.len() * 2);

    for (index, line) in LinesWithEndings::from(code).enumerate() {
      let regions = lines
        .highlight_line(line, Self::syntax_set())
        .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))?;
      let rendered =
        styled_line_to_highlighted_html(&regions, IncludeBackground::No)
          .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))?;
      self.push_line(&mut html, index, &rendered);
    }

    Ok(html)
  }

  fn highlight_classed(
    &self,
    code: &str,
    syntax: &syntect::parsing::SyntaxReference,
  ) -> SyntaxResult<String> {
    use syntect::{
      html::{ClassStyle, ClassedHTMLGenerator},
      util::LinesWithEndings,
    };

    if self.style.line_numbers {
      // Numbered output highlights line by line so the gutter spans can be
      // interleaved.
      let mut html = String::with_capacity(code.len() * 2);
      for (index, line) in LinesWithEndings::from(code).enumerate() {
        let mut generator = ClassedHTMLGenerator::new_with_class_style(
          syntax,
          Self::syntax_set(),
          ClassStyle::Spaced,
        );
        generator
          .parse_html_for_line_which_includes_newline(line)
          .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))?;
        self.push_line(&mut html, index, &generator.finalize());
      }
      return Ok(html);
    }

    let mut generator = ClassedHTMLGenerator::new_with_class_style(
      syntax,
      Self::syntax_set(),
      ClassStyle::Spaced,
    );
    for line in LinesWithEndings::from(code) {
      generator
        .parse_html_for_line_which_includes_newline(line)
        .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))?;
    }
    Ok(generator.finalize())
  }

  fn push_line(&self, html: &mut String, index: usize, rendered: &str) {
    if self.style.line_numbers {
      html.push_str(&format!(
        "<span class=\"lineno\">{}</span>",
        index + 1
      ));
    }
    html.push_str(rendered);
  }
}

#[cfg(feature = "syntect")]
impl SyntaxHighlighter for SyntectHighlighter {
  fn name(&self) -> &'static str {
    "Syntect"
  }

  fn supports_language(&self, language: &str) -> bool {
    Self::syntax_set()
      .find_syntax_by_token(resolve_alias(language))
      .is_some()
  }

  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String> {
    let syntax_set = Self::syntax_set();
    let syntax = syntax_set
      .find_syntax_by_token(resolve_alias(language))
      .unwrap_or_else(|| syntax_set.find_syntax_plain_text());

    if self.style.inline_styles {
      self.highlight_inline(code, syntax)
    } else {
      self.highlight_classed(code, syntax)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn alias_resolution() {
    assert_eq!(resolve_alias("js"), "javascript");
    assert_eq!(resolve_alias("py"), "python");
    assert_eq!(resolve_alias("rust"), "rust");
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn highlights_known_language() {
    let highlighter = SyntectHighlighter::new(HighlightStyle::default());
    assert!(highlighter.supports_language("rust"));

    let html = highlighter
      .highlight("fn main() {}", "rust")
      .expect("rust should highlight");
    assert!(html.contains("main"));
    assert!(html.contains("<span"));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn unknown_language_falls_back_to_plain_text() {
    let highlighter = SyntectHighlighter::new(HighlightStyle::default());
    let html = highlighter
      .highlight("plain words", "no-such-language")
      .expect("plain text fallback should not fail");
    assert!(html.contains("plain words"));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn inline_styles_produce_style_attributes() {
    let style = HighlightStyle {
      inline_styles: true,
      ..HighlightStyle::default()
    };
    let highlighter = SyntectHighlighter::new(style);
    let html = highlighter
      .highlight("fn main() {}", "rust")
      .expect("rust should highlight");
    assert!(html.contains("style=\""));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn line_numbers_prefix_each_line() {
    let style = HighlightStyle {
      line_numbers: true,
      ..HighlightStyle::default()
    };
    let highlighter = SyntectHighlighter::new(style);
    let html = highlighter
      .highlight("let a = 1;\nlet b = 2;\n", "rust")
      .expect("rust should highlight");
    assert!(html.contains("<span class=\"lineno\">1</span>"));
    assert!(html.contains("<span class=\"lineno\">2</span>"));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn unknown_theme_falls_back() {
    let style = HighlightStyle {
      theme: Some("NoSuchTheme".to_string()),
      ..HighlightStyle::default()
    };
    let highlighter = SyntectHighlighter::new(style);
    assert!(highlighter.highlight("x", "text").is_ok());
  }
}
