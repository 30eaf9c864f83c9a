//! Table-of-contents collection and rendering.
//!
//! Entries are appended in document order, one per heading, and are never
//! deduplicated. The HTML rendering is a deterministic nested list keyed by
//! heading levels relative to the shallowest level present, so identical
//! input always produces identical output.
use crate::types::{Heading, TocEntry};

/// Per-render TOC accumulator.
#[derive(Debug)]
pub struct TocCollector {
  entries:     Vec<TocEntry>,
  auto_number: bool,
}

impl TocCollector {
  /// Create an empty collector. With `auto_number` enabled, labels of
  /// numbered headings are prefixed with their section number and a space.
  #[must_use]
  pub const fn new(auto_number: bool) -> Self {
    Self {
      entries: Vec::new(),
      auto_number,
    }
  }

  /// Append one entry for a heading processed by the numbering pass.
  ///
  /// The heading text is already tag-stripped and entity-decoded; the
  /// numeric prefix comes straight from the render context's computed
  /// number, so unnumbered headings (the level-1 title) never grow one.
  pub fn push(&mut self, heading: &Heading) {
    let label = if self.auto_number && !heading.number.is_empty() {
      format!("{} {}", heading.number, heading.text)
    } else {
      heading.text.clone()
    };

    self.entries.push(TocEntry {
      level: heading.level,
      id: heading.id.clone(),
      label,
    });
  }

  /// Consume the collector, yielding entries in document order.
  #[must_use]
  pub fn into_entries(self) -> Vec<TocEntry> {
    self.entries
  }
}

/// Render TOC entries as a nested HTML list.
///
/// Levels are interpreted relative to the shallowest entry; a deeper entry
/// opens as many nested `<ul>` elements as it skips levels, a shallower one
/// closes them again. Labels are HTML-escaped on output.
#[must_use]
pub fn render_toc_html(entries: &[TocEntry]) -> String {
  let Some(base) = entries.iter().map(|e| e.level).min() else {
    return String::new();
  };

  let mut html = String::from("<ul class=\"toc\">\n");
  let mut current = base;

  for entry in entries {
    let level = entry.level.max(base);
    while current < level {
      html.push_str("<ul>\n");
      current += 1;
    }
    while current > level {
      html.push_str("</ul>\n");
      current -= 1;
    }

    let label = html_escape::encode_text(&entry.label);
    if entry.id.is_empty() {
      html.push_str(&format!("<li>{label}</li>\n"));
    } else {
      html.push_str(&format!(
        "<li><a href=\"#{}\">{label}</a></li>\n",
        entry.id
      ));
    }
  }

  while current > base {
    html.push_str("</ul>\n");
    current -= 1;
  }
  html.push_str("</ul>\n");

  html
}

#[cfg(test)]
mod tests {
  use super::*;

  fn heading(level: u8, number: &str, text: &str, id: &str) -> Heading {
    Heading {
      text:   text.to_string(),
      level,
      id:     id.to_string(),
      number: number.to_string(),
    }
  }

  #[test]
  fn auto_number_prefixes_label() {
    let mut collector = TocCollector::new(true);
    collector.push(&heading(2, "1", "Intro", "1-intro"));
    let entries = collector.into_entries();
    assert_eq!(entries[0].label, "1 Intro");
  }

  #[test]
  fn no_auto_number_keeps_plain_label() {
    let mut collector = TocCollector::new(false);
    collector.push(&heading(2, "1", "Intro", "1-intro"));
    assert_eq!(collector.into_entries()[0].label, "Intro");
  }

  #[test]
  fn title_never_gets_a_numeric_prefix() {
    let mut collector = TocCollector::new(true);
    collector.push(&heading(1, "", "My Post", "my-post"));
    assert_eq!(collector.into_entries()[0].label, "My Post");
  }

  #[test]
  fn entries_keep_document_order_and_duplicates() {
    let mut collector = TocCollector::new(false);
    collector.push(&heading(2, "1", "Setup", "1-setup"));
    collector.push(&heading(2, "2", "Setup", "2-setup"));
    let entries = collector.into_entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "1-setup");
    assert_eq!(entries[1].id, "2-setup");
  }

  #[test]
  fn nested_list_follows_levels() {
    let entries = vec![
      TocEntry {
        level: 2,
        id:    "1-a".into(),
        label: "A".into(),
      },
      TocEntry {
        level: 3,
        id:    "1.1-b".into(),
        label: "B".into(),
      },
      TocEntry {
        level: 2,
        id:    "2-c".into(),
        label: "C".into(),
      },
    ];

    let html = render_toc_html(&entries);
    assert_eq!(
      html,
      "<ul class=\"toc\">\n<li><a href=\"#1-a\">A</a></li>\n<ul>\n<li><a \
       href=\"#1.1-b\">B</a></li>\n</ul>\n<li><a \
       href=\"#2-c\">C</a></li>\n</ul>\n"
    );
  }

  #[test]
  fn rendering_is_stable_for_identical_input() {
    let entries = vec![TocEntry {
      level: 2,
      id:    "1-a".into(),
      label: "A".into(),
    }];
    assert_eq!(render_toc_html(&entries), render_toc_html(&entries));
  }

  #[test]
  fn empty_entries_render_empty_string() {
    assert_eq!(render_toc_html(&[]), "");
  }

  #[test]
  fn labels_are_escaped_on_output() {
    let entries = vec![TocEntry {
      level: 2,
      id:    "1-x".into(),
      label: "Fish & <Chips>".into(),
    }];
    let html = render_toc_html(&entries);
    assert!(html.contains("Fish &amp; &lt;Chips&gt;"));
  }
}
