use color_eyre::eyre::{Context, Result};
use quill_config::Config;
use quill_markdown::Post;
use tera::Tera;

// Fallback template compiled into the binary.
const POST_TEMPLATE: &str = include_str!("../templates/post.html");

/// Render a full HTML page for a post.
///
/// The post's own title falls back to the site title when the front matter
/// had none.
pub fn render_page(config: &Config, post: &Post) -> Result<String> {
  let mut tera = Tera::default();
  tera
    .add_raw_template("post", POST_TEMPLATE)
    .wrap_err("Failed to parse post template")?;

  let mut context = tera::Context::new();
  context.insert(
    "title",
    post.metadata.title.as_deref().unwrap_or(&config.title),
  );
  context.insert("site_title", &config.title);
  context.insert("footer_text", &config.footer_text);
  context.insert("content", &post.body.html);
  context.insert("toc", &post.body.toc_html);

  tera
    .render("post", &context)
    .wrap_err("Failed to render post template")
}
