//! Small text helpers shared by the rendering passes.
use std::sync::LazyLock;

use regex::Regex;

/// Slugify a string for use as an anchor ID.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single dash and trims leading/trailing dashes, so `"Hello,  World!"`
/// becomes `"hello-world"`.
#[must_use]
pub fn slugify(text: &str) -> String {
  let mut slug = String::with_capacity(text.len());
  let mut pending_dash = false;

  for c in text.chars() {
    if c.is_alphanumeric() {
      if pending_dash && !slug.is_empty() {
        slug.push('-');
      }
      pending_dash = false;
      for lc in c.to_lowercase() {
        slug.push(lc);
      }
    } else {
      pending_dash = true;
    }
  }

  slug
}

/// Strip HTML tags from a rendered fragment, keeping text content only.
///
/// Good enough for heading innards (inline markup, no nesting games); the
/// passes that need real structure parse a DOM instead.
#[must_use]
pub fn strip_tags(html: &str) -> String {
  static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").unwrap_or_else(|e| {
      log::error!("Failed to compile TAG_RE regex: {e}");
      never_matching_regex()
    })
  });
  TAG_RE.replace_all(html, "").into_owned()
}

/// Decode HTML entities to literal characters.
#[must_use]
pub fn decode_entities(text: &str) -> String {
  html_escape::decode_html_entities(text).into_owned()
}

/// Create a regex that never matches anything.
///
/// Fallback for the (statically impossible) case of a pattern failing to
/// compile: it asserts a character that is neither space nor non-space.
///
/// # Panics
///
/// Panics if the fallback pattern `r"^\b$"` fails to compile, which should
/// never happen.
#[must_use]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    #[allow(clippy::unwrap_used, reason = "Pattern is guaranteed to be valid")]
    Regex::new(r"^\b$").unwrap()
  })
}
