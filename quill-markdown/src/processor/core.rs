//! Core implementation of the post renderer.
//!
//! The pipeline for a body render: embed-transform preprocessing, the
//! engine render, the heading-numbering pass (IDs plus TOC collection),
//! footnote renumbering, and optional code-block highlighting. A full post
//! render splits front matter first and merges the rendered TOC into the
//! metadata afterwards.
use std::sync::LazyLock;

use comrak::{Arena, options::Options, parse_document};
use regex::{Captures, Regex};

use super::types::{PostRenderer, RenderOptions};
use crate::{
  embeds, footnotes,
  headings::HeadingPass,
  syntax::create_default_highlighter,
  toc::{self, TocCollector},
  types::{Post, RenderedBody},
  utils,
};

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?s)<pre><code class="language-([^"]+)">(.*?)</code></pre>"#)
    .unwrap_or_else(|e| {
      log::error!("Failed to compile CODE_BLOCK_RE regex: {e}");
      utils::never_matching_regex()
    })
});

impl PostRenderer {
  /// Create a new `PostRenderer` with the given options.
  #[must_use]
  pub fn new(options: RenderOptions) -> Self {
    let highlighter = if options.highlight_code {
      match create_default_highlighter(options.highlight.clone()) {
        Ok(highlighter) => Some(highlighter),
        Err(e) => {
          log::error!("syntax highlighting unavailable: {e}");
          None
        },
      }
    } else {
      None
    };

    Self {
      options,
      highlighter,
    }
  }

  /// Access renderer options.
  #[must_use]
  pub const fn options(&self) -> &RenderOptions {
    &self.options
  }

  /// Render a complete post source file: front matter plus body.
  ///
  /// The rendered TOC is also stored in the metadata map under the
  /// reserved `toc` key, as downstream templates expect.
  #[must_use]
  pub fn render_post(&self, source: &str) -> Post {
    let document = crate::post::split_front_matter(source);
    let mut metadata = crate::post::parse_metadata(&document);
    let body = self.render_body(&document.body);

    metadata
      .extra
      .insert("toc".to_string(), body.toc_html.clone());

    Post { metadata, body }
  }

  /// Render a post body to HTML, collecting headings and the TOC.
  ///
  /// Every render constructs fresh pass state; nothing is shared between
  /// calls or documents.
  #[must_use]
  pub fn render_body(&self, markdown: &str) -> RenderedBody {
    let preprocessed =
      embeds::apply_chain(markdown, &self.options.transforms);
    let html = self.convert_to_html(&preprocessed);

    let mut pass =
      HeadingPass::new(self.options.heading_id_prefix.as_deref());
    let html = pass.assign_ids(&html);
    let headings = pass.into_headings();

    let mut collector = TocCollector::new(self.options.toc_auto_number);
    for heading in &headings {
      collector.push(heading);
    }
    let entries = collector.into_entries();
    let toc_html = toc::render_toc_html(&entries);

    let known = footnotes::collect_footnote_ids(&html);
    let html = if known.is_empty() {
      html
    } else {
      footnotes::renumber_references(&html, &known)
    };

    let html = if self.highlighter.is_some() {
      self.highlight_codeblocks(&html)
    } else {
      html
    };

    RenderedBody {
      html,
      headings,
      toc: entries,
      toc_html,
    }
  }

  /// Convert markdown to HTML using comrak and the configured options.
  fn convert_to_html(&self, content: &str) -> String {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    let mut html = String::new();
    comrak::format_html(root, &options, &mut html).unwrap_or_default();
    html
  }

  /// Build comrak options for body rendering.
  ///
  /// Heading IDs stay disabled; the numbering pass owns them.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.footnotes = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    options.extension.autolink = true;
    options.extension.header_ids = None;
    // Embed transforms splice raw HTML into the source text
    options.render.r#unsafe = true;
    options
  }

  /// Replace fenced code blocks with highlighted HTML.
  ///
  /// Blocks without a language class and blocks the backend fails on are
  /// left untouched; a backend panic falls back to the unhighlighted
  /// fragment.
  fn highlight_codeblocks(&self, html: &str) -> String {
    let Some(highlighter) = self.highlighter.as_ref() else {
      return html.to_string();
    };

    super::process::process_safe(
      html,
      |input| {
        CODE_BLOCK_RE
          .replace_all(input, |caps: &Captures| {
            let language = &caps[1];
            let code = utils::decode_entities(&caps[2]);

            match highlighter.highlight(&code, language) {
              Ok(highlighted) => {
                format!(
                  "<pre class=\"highlight\"><code \
                   class=\"language-{language}\">{highlighted}</code></pre>"
                )
              },
              Err(e) => {
                log::warn!("failed to highlight {language} code block: {e}");
                caps[0].to_string()
              },
            }
          })
          .into_owned()
      },
      html,
    )
  }
}
