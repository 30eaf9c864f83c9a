use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result};
use log::{debug, info};
use quill_config::Config;
use quill_markdown::{
  HighlightStyle,
  PostRenderer,
  RenderOptionsBuilder,
  render_with_recovery,
  resolve_chain,
};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::template;

/// Source extensions the reader accepts.
const POST_EXTENSIONS: [&str; 3] = ["md", "mkd", "markdown"];

/// Collect all post source files under the input directory.
#[must_use]
pub fn collect_post_files(input_dir: &Path) -> Vec<PathBuf> {
  let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
    .follow_links(true)
    .into_iter()
    .filter_map(Result::ok)
    .filter(|entry| {
      entry.path().is_file()
        && entry.path().extension().is_some_and(|ext| {
          POST_EXTENSIONS
            .iter()
            .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
    })
    .map(|entry| entry.into_path())
    .collect();

  // Deterministic build order regardless of directory traversal
  files.sort();
  files
}

/// Build a renderer from loaded configuration.
///
/// Transform names are resolved here, before any document is touched, so a
/// configuration typo fails the run up front.
pub fn create_renderer(config: &Config) -> Result<PostRenderer> {
  let transforms = resolve_chain(&config.reader.transforms)
    .wrap_err("Invalid [reader] transform configuration")?;

  let options = RenderOptionsBuilder::new()
    .transforms(transforms)
    .toc_auto_number(config.reader.toc_auto_number)
    .heading_id_prefix(config.heading_id_prefix())
    .highlight_code(config.highlight.enable)
    .highlight(HighlightStyle {
      theme:         config.highlight.theme.clone(),
      inline_styles: config.highlight.inline,
      line_numbers:  config.highlight.line_numbers,
    })
    .build();

  Ok(PostRenderer::new(options))
}

/// Read a post source file, normalizing to UTF-8.
pub fn read_post_source(path: &Path) -> Result<String> {
  let bytes = fs::read(path)
    .wrap_err_with(|| format!("Failed to read post file: {}", path.display()))?;
  debug!("read {}", path.display());
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Render every post in the input directory and write the HTML pages.
///
/// Posts render in parallel; each worker gets its own per-document pass
/// state from the shared renderer. A post that fails is logged and skipped
/// so the rest of the batch still builds.
pub fn build_site(config: &Config) -> Result<()> {
  let Some(input_dir) = config.input_dir.as_deref() else {
    info!("No input directory provided, nothing to build");
    return Ok(());
  };

  info!("Input directory: {}", input_dir.display());
  let files = collect_post_files(input_dir);
  info!("Found {} post files", files.len());

  fs::create_dir_all(&config.output_dir).wrap_err_with(|| {
    format!(
      "Failed to create output directory: {}",
      config.output_dir.display()
    )
  })?;

  let renderer = create_renderer(config)?;

  let failures: usize = files
    .par_iter()
    .map(|file| {
      match render_one(config, &renderer, input_dir, file) {
        Ok(()) => 0,
        Err(e) => {
          log::error!("Failed to render {}: {e:#}", file.display());
          1
        },
      }
    })
    .sum();

  if failures > 0 {
    log::warn!("{failures} post(s) failed to render");
  }
  info!(
    "Site generated successfully in {}",
    config.output_dir.display()
  );

  Ok(())
}

/// Render one post file and write its page under the output directory,
/// mirroring the input directory layout.
fn render_one(
  config: &Config,
  renderer: &PostRenderer,
  input_dir: &Path,
  file: &Path,
) -> Result<()> {
  let source = read_post_source(file)?;
  let post = render_with_recovery(renderer, &source);
  let page = template::render_page(config, &post)?;

  let rel_path = file.strip_prefix(input_dir).unwrap_or(file);
  let mut output_path = config.output_dir.join(rel_path);
  output_path.set_extension("html");

  if let Some(parent) = output_path.parent() {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create output directory: {}", parent.display())
    })?;
  }

  fs::write(&output_path, page).wrap_err_with(|| {
    format!("Failed to write output HTML: {}", output_path.display())
  })?;

  Ok(())
}
