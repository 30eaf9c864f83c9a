//! Render a sample post and print what the pipeline produced.
//!
//! Run with: `cargo run --example render -p quill-markdown`
#![allow(clippy::print_stdout)]

use quill_markdown::{PostRenderer, RenderOptionsBuilder};

const SAMPLE_POST: &str = r"# Shipping the rewrite

- date: 2020-01-01
- category: engineering
- tags: rust, markdown

---

## Why bother

The old pipeline numbered footnotes by definition order[^order], which
reads backwards when definitions live at the bottom of the file[^style].

## What changed

### Heading numbers

Headings below the title get dotted section numbers and anchors.

### Embeds

Commit references like octocat/hello-world@0123456789abcdef0123456789abcdef01234567
turn into links.

[^style]: A habit from editing long posts.
[^order]: First-reference order is what readers expect.
";

fn main() {
  let options = RenderOptionsBuilder::new()
    .toc_auto_number(true)
    .heading_id_prefix(Some("post"))
    .highlight_code(false)
    .build();
  let renderer = PostRenderer::new(options);

  let post = renderer.render_post(SAMPLE_POST);

  println!("title: {:?}", post.metadata.title);
  for (key, value) in &post.metadata.extra {
    if key != "toc" {
      println!("meta:  {key} = {value}");
    }
  }

  println!("\nheadings:");
  for heading in &post.body.headings {
    println!(
      "  h{} [{}] {} -> #{}",
      heading.level, heading.number, heading.text, heading.id
    );
  }

  println!("\ntoc html:\n{}", post.body.toc_html);
  println!("body html:\n{}", post.body.html);
}
