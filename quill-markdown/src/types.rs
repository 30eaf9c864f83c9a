//! Types for the quill-markdown public API.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A heading encountered during a body render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Heading text (inline content, tags stripped, entities decoded).
  pub text:   String,
  /// Heading level (1-6).
  pub level:  u8,
  /// Anchor ID assigned by the numbering pass. May be empty for a heading
  /// with no text in a document with no ID prefix.
  pub id:     String,
  /// Dotted section number, e.g. `"1.3.2"`. Empty for level-1 headings.
  pub number: String,
}

/// One table-of-contents entry, in document order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TocEntry {
  /// Heading level (1-6).
  pub level: u8,
  /// Anchor ID of the heading this entry points to.
  pub id:    String,
  /// Display label: optional numeric prefix plus the unescaped heading
  /// text.
  pub label: String,
}

/// A source document split at the front-matter delimiter.
///
/// Header and body are disjoint and newline-preserving; the delimiter line
/// itself belongs to neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
  /// Everything before the first `---` line.
  pub header: String,
  /// Everything after it. Empty when no delimiter was found.
  pub body:   String,
}

/// Metadata recovered from a post's front matter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
  /// Text of the first `<h1>` in the rendered header, if any.
  pub title: Option<String>,

  /// The post body, verbatim, prior to rendering.
  pub source_text: String,

  /// `key: value` pairs from the header's list items, in order of first
  /// appearance. Later duplicates overwrite earlier values in place.
  #[serde(flatten)]
  pub extra: IndexMap<String, String>,
}

impl Metadata {
  /// Look up a front-matter field by key.
  #[must_use]
  pub fn get(&self, key: &str) -> Option<&str> {
    self.extra.get(key).map(String::as_str)
  }
}

/// Result of rendering a post body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedBody {
  /// Rendered HTML output.
  pub html: String,

  /// Headings in document order, with assigned IDs and section numbers.
  pub headings: Vec<Heading>,

  /// Table-of-contents entries in document order.
  pub toc: Vec<TocEntry>,

  /// Pre-rendered nested-list TOC HTML.
  pub toc_html: String,
}

/// A fully processed blog post: front-matter metadata plus rendered body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
  /// Parsed front matter. Also carries the rendered TOC under the
  /// reserved `toc` key.
  pub metadata: Metadata,

  /// Rendered body HTML with TOC attached.
  pub body: RenderedBody,
}
