//! High-level rendering functions with error recovery.
//!
//! A malformed document must never take down a batch render, so whole-post
//! rendering is wrapped in panic containment: an engine panic degrades to
//! an error document and a log line.
use log::error;

use super::types::PostRenderer;
use crate::types::{Metadata, Post, RenderedBody};

/// Render a post with panic recovery.
///
/// Falls back to an error document if rendering panics at any stage; the
/// panic is logged and processing of other documents can continue.
#[must_use]
pub fn render_with_recovery(renderer: &PostRenderer, source: &str) -> Post {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    renderer.render_post(source)
  })) {
    Ok(post) => post,
    Err(panic_err) => {
      error!("Panic during post rendering: {panic_err:?}");
      Post {
        metadata: Metadata::default(),
        body:     RenderedBody {
          html: "<div class=\"error\">Critical error rendering post \
                 content</div>"
            .to_string(),
          headings: Vec::new(),
          toc: Vec::new(),
          toc_html: String::new(),
        },
      }
    },
  }
}

/// Safely apply a text-processing function with a fallback.
///
/// Catches panics from malformed input and returns the fallback (or the
/// input itself when the fallback is empty) rather than failing the whole
/// document.
pub fn process_safe<F>(content: &str, processor_fn: F, fallback: &str) -> String
where
  F: FnOnce(&str) -> String,
{
  if content.is_empty() {
    return String::new();
  }

  let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    processor_fn(content)
  }));

  match result {
    Ok(processed) => processed,
    Err(e) => {
      if let Some(message) = e.downcast_ref::<String>() {
        error!("Error processing markup: {message}");
      } else if let Some(message) = e.downcast_ref::<&str>() {
        error!("Error processing markup: {message}");
      } else {
        error!("Unknown error occurred while processing markup");
      }

      if fallback.is_empty() {
        content.to_string()
      } else {
        fallback.to_string()
      }
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::processor::types::RenderOptions;

  #[test]
  fn process_safe_passes_through_on_success() {
    let result =
      process_safe("content", |s| format!("processed: {s}"), "fallback");
    assert_eq!(result, "processed: content");
  }

  #[test]
  #[allow(clippy::panic)]
  fn process_safe_uses_fallback_on_panic() {
    let result = process_safe("content", |_| panic!("boom"), "fallback");
    assert_eq!(result, "fallback");
  }

  #[test]
  #[allow(clippy::panic)]
  fn process_safe_returns_input_when_fallback_empty() {
    let result = process_safe("content", |_| panic!("boom"), "");
    assert_eq!(result, "content");
  }

  #[test]
  fn recovery_renders_normal_posts() {
    let renderer = PostRenderer::new(RenderOptions::default());
    let post = render_with_recovery(
      &renderer,
      "# Title\n\n- date: 2020-01-01\n\n---\n\nBody.\n",
    );
    assert_eq!(post.metadata.title.as_deref(), Some("Title"));
    assert!(post.body.html.contains("Body."));
  }
}
