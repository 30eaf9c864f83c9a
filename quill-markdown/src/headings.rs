//! Hierarchical heading numbering and anchor-ID assignment.
//!
//! A render pass owns one [`HeadingPass`] per document. The pass walks the
//! rendered HTML's headings in document order, advances a counter stack to
//! produce dotted section numbers (`1`, `1.1`, `1.2`, `2`, ...), and
//! rewrites each heading tag with a composed anchor ID. Level-1 headings
//! are the post title and never receive a number.
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{
  types::Heading,
  utils::{decode_entities, never_matching_regex, slugify, strip_tags},
};

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)<h([1-6])>(.*?)</h[1-6]>").unwrap_or_else(|e| {
    log::error!("Failed to compile HEADING_RE regex: {e}");
    never_matching_regex()
  })
});

/// Counter stack for dotted section numbers.
///
/// One counter per active nesting depth below the title level: a document
/// level-2 heading drives index 0, level 3 drives index 1, and so on. The
/// stack is reset at the start of every render and never shared across
/// documents.
#[derive(Debug, Default)]
pub struct SectionCounters {
  stack: Vec<u64>,
}

impl SectionCounters {
  /// Create an empty counter stack.
  #[must_use]
  pub const fn new() -> Self {
    Self { stack: Vec::new() }
  }

  /// Advance the counters for a heading at document `level` and return its
  /// dotted section number.
  ///
  /// Level 1 always yields the empty string and leaves the stack alone.
  /// Otherwise: a deeper heading appends a fresh counter at 1, a sibling
  /// increments the last counter, and a shallower heading truncates the
  /// stack to its depth before incrementing.
  pub fn advance(&mut self, level: u8) -> String {
    if level <= 1 {
      return String::new();
    }

    let depth = usize::from(level) - 1;
    if depth > self.stack.len() {
      self.stack.push(1);
    } else {
      // Example: depth == 1, stack == [1, 3, 2]  =>  stack == [2]
      self.stack.truncate(depth);
      if let Some(last) = self.stack.last_mut() {
        *last += 1;
      }
    }

    self
      .stack
      .iter()
      .map(ToString::to_string)
      .collect::<Vec<_>>()
      .join(".")
  }
}

/// Compose an anchor ID from an optional prefix, a section number and a
/// slug, omitting empty segments and their separators.
///
/// All three empty degrades to an empty ID; callers emit such headings
/// without an `id` attribute.
#[must_use]
pub fn compose_heading_id(
  prefix: Option<&str>,
  number: &str,
  slug: &str,
) -> String {
  let segments = [prefix.unwrap_or_default(), number, slug];
  segments
    .iter()
    .filter(|s| !s.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join("-")
}

/// Per-render heading state: the counter stack plus the headings collected
/// so far. Constructed fresh for every document.
#[derive(Debug)]
pub struct HeadingPass {
  counters:  SectionCounters,
  headings:  Vec<Heading>,
  id_prefix: Option<String>,
}

impl HeadingPass {
  /// Create a fresh pass with the configured heading-ID prefix.
  #[must_use]
  pub fn new(id_prefix: Option<&str>) -> Self {
    Self {
      counters:  SectionCounters::new(),
      headings:  Vec::new(),
      id_prefix: id_prefix
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToOwned::to_owned),
    }
  }

  /// Rewrite every heading tag in `html` with its assigned anchor ID,
  /// recording one [`Heading`] per tag in document order.
  ///
  /// Headings whose composed ID is empty (no prefix, no number, no slug)
  /// are passed through unchanged rather than given an empty attribute.
  pub fn assign_ids(&mut self, html: &str) -> String {
    HEADING_RE
      .replace_all(html, |caps: &Captures| {
        let level = caps[1].parse::<u8>().unwrap_or(1);
        let inner = &caps[2];
        let text = decode_entities(&strip_tags(inner)).trim().to_string();

        let number = self.counters.advance(level);
        let slug = slugify(&text);
        let id = compose_heading_id(self.id_prefix.as_deref(), &number, &slug);

        self.headings.push(Heading {
          text,
          level,
          id: id.clone(),
          number,
        });

        if id.is_empty() {
          format!("<h{level}>{inner}</h{level}>")
        } else {
          format!("<h{level} id=\"{id}\">{inner}</h{level}>")
        }
      })
      .into_owned()
  }

  /// Consume the pass, yielding the collected headings.
  #[must_use]
  pub fn into_headings(self) -> Vec<Heading> {
    self.headings
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn numbers_for(levels: &[u8]) -> Vec<String> {
    let mut counters = SectionCounters::new();
    levels.iter().map(|&l| counters.advance(l)).collect()
  }

  #[test]
  fn sibling_and_child_sequence() {
    assert_eq!(numbers_for(&[2, 3, 3, 2, 3]), [
      "1", "1.1", "1.2", "2", "2.1"
    ]);
  }

  #[test]
  fn deep_then_shallow_truncates() {
    assert_eq!(numbers_for(&[2, 3, 4, 2]), ["1", "1.1", "1.1.1", "2"]);
  }

  #[test]
  fn level_one_is_always_unnumbered() {
    assert_eq!(numbers_for(&[1, 2, 1, 2, 3, 1]), [
      "", "1", "", "2", "2.1", ""
    ]);
  }

  #[test]
  fn compose_omits_empty_segments() {
    assert_eq!(compose_heading_id(Some("post"), "1.2", "intro"), "post-1.2-intro");
    assert_eq!(compose_heading_id(None, "1.2", "intro"), "1.2-intro");
    assert_eq!(compose_heading_id(Some("post"), "", "intro"), "post-intro");
    assert_eq!(compose_heading_id(None, "", ""), "");
  }

  #[test]
  fn assign_ids_rewrites_headings_in_order() {
    let mut pass = HeadingPass::new(None);
    let html = "<h1>Title</h1>\n<h2>First Steps</h2>\n<h3>Details</h3>";
    let out = pass.assign_ids(html);

    assert!(out.contains("<h1 id=\"title\">Title</h1>"));
    assert!(out.contains("<h2 id=\"1-first-steps\">First Steps</h2>"));
    assert!(out.contains("<h3 id=\"1.1-details\">Details</h3>"));

    let headings = pass.into_headings();
    assert_eq!(headings.len(), 3);
    assert_eq!(headings[0].number, "");
    assert_eq!(headings[1].number, "1");
    assert_eq!(headings[2].number, "1.1");
  }

  #[test]
  fn assign_ids_with_prefix() {
    let mut pass = HeadingPass::new(Some("post"));
    let out = pass.assign_ids("<h2>Intro</h2>");
    assert!(out.contains("<h2 id=\"post-1-intro\">Intro</h2>"));
  }

  #[test]
  fn heading_with_inline_markup_slugs_on_text() {
    let mut pass = HeadingPass::new(None);
    let out = pass.assign_ids("<h2>Use <code>cargo build</code> first</h2>");
    assert!(out.contains("id=\"1-use-cargo-build-first\""));

    let headings = pass.into_headings();
    assert_eq!(headings[0].text, "Use cargo build first");
  }

  #[test]
  fn untitled_heading_does_not_crash() {
    let mut pass = HeadingPass::new(None);
    let out = pass.assign_ids("<h1></h1>");
    // No prefix, no number, no slug: heading passes through without an id.
    assert_eq!(out, "<h1></h1>");
    assert_eq!(pass.into_headings()[0].id, "");
  }

  #[test]
  fn entities_are_decoded_in_heading_text() {
    let mut pass = HeadingPass::new(None);
    pass.assign_ids("<h2>Fish &amp; Chips</h2>");
    assert_eq!(pass.into_headings()[0].text, "Fish & Chips");
  }

  #[test]
  fn fresh_pass_restarts_numbering() {
    let mut first = HeadingPass::new(None);
    first.assign_ids("<h2>A</h2><h2>B</h2>");

    let mut second = HeadingPass::new(None);
    second.assign_ids("<h2>C</h2>");
    assert_eq!(second.into_headings()[0].number, "1");
  }
}
