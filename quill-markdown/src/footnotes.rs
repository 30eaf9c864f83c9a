//! Footnote-reference renumbering.
//!
//! Footnote definitions may be declared in any order, so the numbers the
//! engine assigns by definition order can disagree with the order readers
//! encounter the references. This pass rewrites every reference marker so
//! display numbers follow first-appearance order in the rendered fragment,
//! scanning left to right. Unknown identifiers are left untouched and
//! re-running the pass on corrected output is a no-op.
use std::{collections::HashSet, sync::LazyLock};

use regex::{Captures, Regex};

use crate::utils::never_matching_regex;

// comrak renders a reference marker as
//   <sup class="footnote-ref"><a href="#fn-ID" id="fnref-ID"
//     data-footnote-ref>N</a></sup>
// (repeat references get a suffix on the fnref id). The pattern captures
// the identifier, the id attribute and any trailing attributes separately
// because the regex crate has no backreferences.
static FOOTNOTE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r##"<sup class="footnote-ref"><a href="#fn-([^"]+)" id="(fnref-[^"]+)"([^>]*)>(\d+)</a></sup>"##,
  )
  .unwrap_or_else(|e| {
    log::error!("Failed to compile FOOTNOTE_REF_RE regex: {e}");
    never_matching_regex()
  })
});

static FOOTNOTE_DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"<li id="fn-([^"]+)">"#).unwrap_or_else(|e| {
    log::error!("Failed to compile FOOTNOTE_DEF_RE regex: {e}");
    never_matching_regex()
  })
});

/// Collect the identifiers of all footnote definitions present in a
/// rendered fragment.
#[must_use]
pub fn collect_footnote_ids(html: &str) -> HashSet<String> {
  FOOTNOTE_DEF_RE
    .captures_iter(html)
    .map(|caps| caps[1].to_string())
    .collect()
}

/// Rewrite footnote-reference numbers to first-appearance order.
///
/// Markers whose identifier is in `known` get the 1-based rank of that
/// identifier's first appearance; markers pointing at unknown identifiers
/// pass through byte-identical. A fragment without markers is returned
/// unchanged.
#[must_use]
pub fn renumber_references(html: &str, known: &HashSet<String>) -> String {
  let mut registry: Vec<String> = Vec::new();

  FOOTNOTE_REF_RE
    .replace_all(html, |caps: &Captures| {
      let identifier = &caps[1];
      if !known.contains(identifier) {
        return caps[0].to_string();
      }

      let rank = registry
        .iter()
        .position(|seen| seen == identifier)
        .unwrap_or_else(|| {
          registry.push(identifier.to_string());
          registry.len() - 1
        });

      format!(
        "<sup class=\"footnote-ref\"><a href=\"#fn-{}\" id=\"{}\"{}>{}</a></sup>",
        identifier,
        &caps[2],
        &caps[3],
        rank + 1
      )
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn marker(id: &str, num: u32) -> String {
    format!(
      "<sup class=\"footnote-ref\"><a href=\"#fn-{id}\" id=\"fnref-{id}\" \
       data-footnote-ref>{num}</a></sup>"
    )
  }

  fn definition(id: &str, text: &str) -> String {
    format!("<li id=\"fn-{id}\"><p>{text}</p></li>")
  }

  #[test]
  fn collects_definition_ids() {
    let html = format!(
      "<section class=\"footnotes\"><ol>{}{}</ol></section>",
      definition("a", "first"),
      definition("b", "second")
    );
    let ids = collect_footnote_ids(&html);
    assert!(ids.contains("a"));
    assert!(ids.contains("b"));
    assert_eq!(ids.len(), 2);
  }

  #[test]
  fn references_follow_text_order_not_definition_order() {
    // Definitions declared [b, a]; references appear [a, b] in the text.
    let html = format!(
      "<p>first{} then{}</p><ol>{}{}</ol>",
      marker("a", 2),
      marker("b", 1),
      definition("b", "bee"),
      definition("a", "ay")
    );
    let known = collect_footnote_ids(&html);
    let out = renumber_references(&html, &known);

    assert!(out.contains(&marker("a", 1)));
    assert!(out.contains(&marker("b", 2)));
  }

  #[test]
  fn repeat_references_collapse_to_first_rank() {
    let html = format!(
      "{} {} {}<ol>{}{}</ol>",
      marker("x", 1),
      marker("y", 2),
      marker("x", 3),
      definition("x", ""),
      definition("y", "")
    );
    let known = collect_footnote_ids(&html);
    let out = renumber_references(&html, &known);

    assert_eq!(out.matches(&marker("x", 1)).count(), 2);
    assert!(out.contains(&marker("y", 2)));
  }

  #[test]
  fn renumbering_is_idempotent() {
    let html = format!(
      "{}{}<ol>{}{}</ol>",
      marker("b", 2),
      marker("a", 1),
      definition("a", ""),
      definition("b", "")
    );
    let known = collect_footnote_ids(&html);
    let once = renumber_references(&html, &known);
    let twice = renumber_references(&once, &known);
    assert_eq!(once, twice);
  }

  #[test]
  fn unknown_identifiers_are_untouched() {
    let html = format!("{}<ol>{}</ol>", marker("ghost", 7), definition("real", ""));
    let known = collect_footnote_ids(&html);
    let out = renumber_references(&html, &known);
    assert!(out.contains(&marker("ghost", 7)));
  }

  #[test]
  fn fragment_without_markers_is_unchanged() {
    let html = "<p>nothing to see</p>";
    let out = renumber_references(html, &HashSet::new());
    assert_eq!(out, html);
  }
}
