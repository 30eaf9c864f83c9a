//! # quill-markdown — blog-post Markdown processing
//!
//! Renders blog post source files (front-matter metadata block + Markdown
//! body) to HTML plus a structured table of contents, layering custom
//! passes on top of comrak:
//!
//! - front-matter splitting and metadata extraction,
//! - hierarchical heading numbering with anchor IDs and a TOC,
//! - footnote-reference renumbering to first-appearance order,
//! - rich-embed transforms for bare video/gist/commit references,
//! - optional syntax highlighting for fenced code blocks.
//!
//! ## Quick start
//!
//! ```rust
//! use quill_markdown::{PostRenderer, RenderOptions};
//!
//! let renderer = PostRenderer::new(RenderOptions::default());
//! let post = renderer.render_post(
//!   "# Hello\n\n- date: 2020-01-01\n\n---\n\nBody **text**.\n",
//! );
//!
//! println!("Title: {:?}", post.metadata.title);
//! println!("HTML: {}", post.body.html);
//! println!("TOC: {}", post.body.toc_html);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use quill_markdown::{
//!   EmbedTransform, PostRenderer, RenderOptionsBuilder,
//! };
//!
//! let options = RenderOptionsBuilder::new()
//!   .transforms(vec![EmbedTransform::Youtube, EmbedTransform::GithubCommit])
//!   .toc_auto_number(true)
//!   .heading_id_prefix(Some("post"))
//!   .build();
//!
//! let renderer = PostRenderer::new(options);
//! ```
//!
//! Every render uses fresh pass state: documents never leak numbering,
//! TOC entries or footnote registries into one another, so one renderer
//! can be shared by parallel workers.

pub mod embeds;
pub mod footnotes;
pub mod headings;
pub mod post;
pub mod processor;
pub mod syntax;
pub mod toc;
pub mod types;
pub mod utils;

pub use crate::{
  embeds::{EmbedTransform, UnknownTransformError, resolve_chain},
  post::{parse_metadata, split_front_matter},
  processor::{
    PostRenderer,
    RenderOptions,
    RenderOptionsBuilder,
    process_safe,
    render_with_recovery,
  },
  syntax::{HighlightStyle, SyntaxHighlighter},
  types::{Heading, Metadata, Post, RawDocument, RenderedBody, TocEntry},
};
