//! Front-matter splitting and metadata extraction.
//!
//! A post source file is a Markdown header (title plus `key: value` list
//! items), a `---` delimiter line, and the Markdown body:
//!
//! ```markdown
//! # My Title
//!
//! - date: 2020-01-01
//! - tags: a, b
//!
//! ---
//!
//! Body content here.
//! ```
//!
//! The header region is rendered through the engine with plain options and
//! the metadata is read back out of the resulting fragment's `<h1>` and
//! `<li>` elements.
use comrak::{Arena, options::Options, parse_document};
use tendril::TendrilSink;

use crate::types::{Metadata, RawDocument};

/// Split a source file into header and body at the front-matter delimiter.
///
/// The first line whose trimmed content starts with `---` ends the header;
/// that line belongs to neither region. Every later line, blank lines
/// included, is body text, newlines preserved. Without a delimiter the
/// whole input is header and the body is empty; callers treat that as
/// "no body".
#[must_use]
pub fn split_front_matter(source: &str) -> RawDocument {
  let mut header = String::new();
  let mut body = String::new();
  let mut recording = true;

  for line in source.split_inclusive('\n') {
    if recording && line.trim_start().starts_with("---") {
      recording = false;
    } else if recording {
      header.push_str(line);
    } else {
      body.push_str(line);
    }
  }

  RawDocument { header, body }
}

/// Parse post metadata out of a split document.
///
/// The header is rendered to HTML with plain engine options; the first
/// `<h1>`'s text becomes the title and every `<li>` becomes a `key: value`
/// candidate, split on its first colon (key right-trimmed, value
/// left-trimmed, later duplicates overwriting). An item without a colon
/// keeps the whole trimmed item text as its key with an empty value. A
/// missing title is logged and never fatal. The body is stored verbatim
/// under `source_text`.
#[must_use]
pub fn parse_metadata(document: &RawDocument) -> Metadata {
  let html = render_header_html(&document.header);
  let dom = kuchikikiki::parse_html().one(html.as_str());

  let title = dom.select_first("h1").ok().map(|h1| {
    h1.text_contents().trim().to_string()
  });
  if title.is_none() {
    log::error!("no title found in post header");
  }

  let mut metadata = Metadata {
    title,
    source_text: document.body.clone(),
    ..Metadata::default()
  };

  if let Ok(items) = dom.select("li") {
    for item in items {
      let text = item.text_contents();
      let text = text.trim();
      if text.is_empty() {
        continue;
      }

      let (key, value) = match text.find(':') {
        Some(index) => {
          (text[..index].trim_end(), text[index + 1..].trim_start())
        },
        // No colon: the whole item is the key. Deliberate policy, see
        // DESIGN.md.
        None => (text, ""),
      };
      metadata.extra.insert(key.to_string(), value.to_string());
    }
  }

  metadata
}

/// Render the header region with plain engine options (no extensions).
fn render_header_html(header: &str) -> String {
  let arena = Arena::new();
  let mut options = Options::default();
  options.render.r#unsafe = true;

  let root = parse_document(&arena, header, &options);
  let mut html = String::new();
  comrak::format_html(root, &options, &mut html).unwrap_or_default();
  html
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn split_reproduces_header_and_body() {
    let header = "# Title\n\n- date: 2020-01-01\n";
    let body = "Some body.\n\nMore body.\n";
    let source = format!("{header}---\n{body}");

    let document = split_front_matter(&source);
    assert_eq!(document.header, header);
    assert_eq!(document.body, body);
  }

  #[test]
  fn delimiter_line_is_dropped_even_with_many_dashes() {
    let document = split_front_matter("h\n-----------------\nb\n");
    assert_eq!(document.header, "h\n");
    assert_eq!(document.body, "b\n");
  }

  #[test]
  fn indented_delimiter_still_splits() {
    let document = split_front_matter("h\n  ---\nb\n");
    assert_eq!(document.header, "h\n");
    assert_eq!(document.body, "b\n");
  }

  #[test]
  fn later_dash_lines_stay_in_body() {
    let document = split_front_matter("h\n---\nb\n---\nc\n");
    assert_eq!(document.body, "b\n---\nc\n");
  }

  #[test]
  fn missing_delimiter_means_no_body() {
    let source = "# Just a header\n\n- key: value\n";
    let document = split_front_matter(source);
    assert_eq!(document.header, source);
    assert_eq!(document.body, "");
  }

  #[test]
  fn blank_lines_in_body_are_preserved() {
    let document = split_front_matter("h\n---\n\n\nbody\n");
    assert_eq!(document.body, "\n\nbody\n");
  }

  #[test]
  fn metadata_scenario() {
    let document = RawDocument {
      header: "# My Title\n\n- date: 2020-01-01\n- tags: a, b\n".to_string(),
      body:   "content\n".to_string(),
    };

    let metadata = parse_metadata(&document);
    assert_eq!(metadata.title.as_deref(), Some("My Title"));
    assert_eq!(metadata.get("date"), Some("2020-01-01"));
    assert_eq!(metadata.get("tags"), Some("a, b"));
    assert_eq!(metadata.source_text, "content\n");
  }

  #[test]
  fn missing_title_is_absent_not_fatal() {
    let document = RawDocument {
      header: "- date: 2020-01-01\n".to_string(),
      body:   String::new(),
    };
    let metadata = parse_metadata(&document);
    assert_eq!(metadata.title, None);
    assert_eq!(metadata.get("date"), Some("2020-01-01"));
  }

  #[test]
  fn item_without_colon_becomes_bare_key() {
    let document = RawDocument {
      header: "- draft\n".to_string(),
      body:   String::new(),
    };
    let metadata = parse_metadata(&document);
    assert_eq!(metadata.get("draft"), Some(""));
  }

  #[test]
  fn duplicate_keys_overwrite_in_order() {
    let document = RawDocument {
      header: "- tag: first\n- tag: second\n".to_string(),
      body:   String::new(),
    };
    let metadata = parse_metadata(&document);
    assert_eq!(metadata.get("tag"), Some("second"));
  }

  #[test]
  fn value_keeps_interior_colons() {
    let document = RawDocument {
      header: "- link: https://example.com/page\n".to_string(),
      body:   String::new(),
    };
    let metadata = parse_metadata(&document);
    assert_eq!(metadata.get("link"), Some("https://example.com/page"));
  }
}
