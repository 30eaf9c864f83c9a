//! Type definitions for the post renderer.
//!
//! Contains the configuration options ([`RenderOptions`]), their builder,
//! and the renderer struct itself.
//!
//! # Examples
//!
//! ```
//! use quill_markdown::{RenderOptions, PostRenderer};
//!
//! let options = RenderOptions {
//!   toc_auto_number: true,
//!   ..Default::default()
//! };
//!
//! let renderer = PostRenderer::new(options);
//! ```
use std::sync::Arc;

use crate::{
  embeds::EmbedTransform,
  syntax::{HighlightStyle, SyntaxHighlighter},
};

/// Options for configuring the post renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
  /// Embed transforms applied to the body text, in order.
  pub transforms: Vec<EmbedTransform>,

  /// Prefix TOC labels of numbered headings with their section number.
  pub toc_auto_number: bool,

  /// Optional prefix for every generated heading ID.
  pub heading_id_prefix: Option<String>,

  /// Enable syntax highlighting for fenced code blocks.
  pub highlight_code: bool,

  /// Display options handed to the highlighter.
  pub highlight: HighlightStyle,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      transforms:        EmbedTransform::default_chain().to_vec(),
      toc_auto_number:   false,
      heading_id_prefix: None,
      highlight_code:    cfg!(feature = "syntect"),
      highlight:         HighlightStyle::default(),
    }
  }
}

/// The post renderer.
///
/// Holds configuration and the (optional) highlighter backend; all
/// per-document state lives in render-pass contexts created fresh for each
/// call, so one renderer can serve many documents, including from parallel
/// workers. Can be cheaply cloned since the highlighter sits behind an
/// `Arc`.
#[derive(Clone)]
pub struct PostRenderer {
  pub(crate) options:     RenderOptions,
  pub(crate) highlighter: Option<Arc<dyn SyntaxHighlighter>>,
}

/// Builder for constructing [`RenderOptions`] with method chaining.
#[derive(Debug, Clone, Default)]
pub struct RenderOptionsBuilder {
  options: RenderOptions,
}

impl RenderOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the embed-transform chain.
  #[must_use]
  pub fn transforms(mut self, transforms: Vec<EmbedTransform>) -> Self {
    self.options.transforms = transforms;
    self
  }

  /// Enable or disable TOC label auto-numbering.
  #[must_use]
  pub const fn toc_auto_number(mut self, enabled: bool) -> Self {
    self.options.toc_auto_number = enabled;
    self
  }

  /// Set the heading-ID prefix.
  #[must_use]
  pub fn heading_id_prefix<S: Into<String>>(
    mut self,
    prefix: Option<S>,
  ) -> Self {
    self.options.heading_id_prefix = prefix.map(Into::into);
    self
  }

  /// Enable or disable syntax highlighting.
  #[must_use]
  pub const fn highlight_code(mut self, enabled: bool) -> Self {
    self.options.highlight_code = enabled;
    self
  }

  /// Set the highlighter display options.
  #[must_use]
  pub fn highlight(mut self, style: HighlightStyle) -> Self {
    self.options.highlight = style;
    self
  }

  /// Build the final [`RenderOptions`].
  #[must_use]
  pub fn build(self) -> RenderOptions {
    self.options
  }
}
