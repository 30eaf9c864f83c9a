//! Rich-embed link transforms.
//!
//! Each transform is a pure text rewrite that replaces a recognized bare
//! URL token (or commit reference) in the Markdown source with an HTML
//! embed, before the engine runs. Transforms are identified by stable
//! names, resolved eagerly from configuration, and applied in configured
//! order to the cumulative output of the previous one. Text with no
//! matches passes through byte-identical, and fenced code blocks are never
//! rewritten.
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::utils::never_matching_regex;

/// A configured transform name that does not resolve to an implementation.
///
/// Raised at configuration-validation time, before any document renders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
  "unknown embed transform `{0}` (known transforms: youtube, gist, vimeo, \
   screenr, github-commit)"
)]
pub struct UnknownTransformError(pub String);

macro_rules! embed_regex {
  ($name:ident, $pattern:literal) => {
    static $name: LazyLock<Regex> = LazyLock::new(|| {
      Regex::new($pattern).unwrap_or_else(|e| {
        log::error!(
          "Failed to compile {} regex: {e}",
          stringify!($name)
        );
        never_matching_regex()
      })
    });
  };
}

embed_regex!(
  YOUTUBE_RE,
  r"(?i)<(http://www\.youtube\.com/watch\?v=([a-zA-Z0-9_-]+))>"
);
embed_regex!(YOUTUBE_SHORT_RE, r"(?i)<(http://youtu\.be/([a-zA-Z0-9_-]+))>");
embed_regex!(GIST_RE, r"(?i)<(https?://gist\.github\.com/(\d+))>");
embed_regex!(VIMEO_RE, r"(?i)<(http://vimeo\.com/(\d+))>");
embed_regex!(
  SCREENR_RE,
  r"(?i)<(http://www\.screenr\.com/([a-zA-Z0-9]+))>"
);
embed_regex!(
  GITHUB_COMMIT_RE,
  r"([a-zA-Z0-9]+)/([a-zA-Z0-9_-]+)@([a-fA-F0-9]{40})"
);
embed_regex!(
  GITHUB_COMMIT_URL_RE,
  r"<https?://github\.com/([a-zA-Z0-9]+)/([a-zA-Z0-9_-]+)/commit/([a-fA-F0-9]{40})>"
);

/// The registry of embed transforms.
///
/// A fixed set of typed values rather than dynamically resolved paths;
/// [`EmbedTransform::from_name`] is the only place configuration strings
/// meet the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedTransform {
  /// `<http://www.youtube.com/watch?v=ID>` / `<http://youtu.be/ID>` to an
  /// inline 560x315 player frame plus a fallback link.
  Youtube,
  /// `<http(s)://gist.github.com/DIGITS>` to a script-tag embed plus a
  /// fallback link.
  Gist,
  /// `<http://vimeo.com/DIGITS>` to an inline 500x281 player frame plus a
  /// fallback link.
  Vimeo,
  /// `<http://www.screenr.com/ID>` to an inline 500x305 player frame plus
  /// a fallback link.
  Screenr,
  /// `owner/repo@SHA` (40 hex chars, bare or as a bracketed commit URL) to
  /// an anchor titled `owner/repo@shortsha`.
  GithubCommit,
}

impl EmbedTransform {
  /// Stable configuration name of this transform.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Youtube => "youtube",
      Self::Gist => "gist",
      Self::Vimeo => "vimeo",
      Self::Screenr => "screenr",
      Self::GithubCommit => "github-commit",
    }
  }

  /// Resolve a configuration name to a transform.
  ///
  /// # Errors
  ///
  /// Returns [`UnknownTransformError`] for names outside the registry.
  pub fn from_name(name: &str) -> Result<Self, UnknownTransformError> {
    match name {
      "youtube" => Ok(Self::Youtube),
      "gist" => Ok(Self::Gist),
      "vimeo" => Ok(Self::Vimeo),
      "screenr" => Ok(Self::Screenr),
      "github-commit" => Ok(Self::GithubCommit),
      other => Err(UnknownTransformError(other.to_string())),
    }
  }

  /// The default chain, in application order.
  #[must_use]
  pub const fn default_chain() -> [Self; 4] {
    [Self::Youtube, Self::Gist, Self::Vimeo, Self::GithubCommit]
  }

  /// Apply this transform to `text`, replacing every match and leaving
  /// everything else untouched.
  #[must_use]
  pub fn apply(self, text: &str) -> String {
    match self {
      Self::Youtube => {
        let text = YOUTUBE_RE.replace_all(text, youtube_embed);
        YOUTUBE_SHORT_RE.replace_all(&text, youtube_embed).into_owned()
      },
      Self::Gist => GIST_RE.replace_all(text, gist_embed).into_owned(),
      Self::Vimeo => VIMEO_RE.replace_all(text, vimeo_embed).into_owned(),
      Self::Screenr => {
        SCREENR_RE.replace_all(text, screenr_embed).into_owned()
      },
      Self::GithubCommit => {
        let text = GITHUB_COMMIT_RE.replace_all(text, github_commit_link);
        GITHUB_COMMIT_URL_RE
          .replace_all(&text, github_commit_link)
          .into_owned()
      },
    }
  }
}

/// Resolve an ordered list of configured names into a transform chain,
/// failing on the first unknown name.
///
/// # Errors
///
/// Returns [`UnknownTransformError`] for the first unresolvable name.
pub fn resolve_chain<S: AsRef<str>>(
  names: &[S],
) -> Result<Vec<EmbedTransform>, UnknownTransformError> {
  names
    .iter()
    .map(|name| EmbedTransform::from_name(name.as_ref()))
    .collect()
}

/// Apply a transform chain to Markdown text, skipping fenced code blocks.
///
/// The text is walked line by line with the usual fence state machine;
/// contiguous non-code regions are rewritten as one chunk so the chain
/// sees the same spans it would in plain text. Zero matches means the
/// output equals the input byte for byte.
#[must_use]
pub fn apply_chain(text: &str, chain: &[EmbedTransform]) -> String {
  if chain.is_empty() {
    return text.to_string();
  }

  let flush = |chunk: &mut String, out: &mut String| {
    if chunk.is_empty() {
      return;
    }
    let mut transformed = std::mem::take(chunk);
    for transform in chain {
      transformed = transform.apply(&transformed);
    }
    out.push_str(&transformed);
  };

  let mut out = String::with_capacity(text.len());
  let mut chunk = String::new();
  let mut in_code_block = false;
  let mut code_fence_char = ' ';
  let mut code_fence_count = 0;

  for line in text.split_inclusive('\n') {
    let trimmed = line.trim_start();
    let fence_char = trimmed.chars().next().unwrap_or(' ');

    if fence_char == '`' || fence_char == '~' {
      let fence_count = trimmed.chars().take_while(|&c| c == fence_char).count();
      if fence_count >= 3 {
        if !in_code_block {
          flush(&mut chunk, &mut out);
          in_code_block = true;
          code_fence_char = fence_char;
          code_fence_count = fence_count;
        } else if fence_char == code_fence_char
          && fence_count >= code_fence_count
        {
          in_code_block = false;
        }
        out.push_str(line);
        continue;
      }
    }

    if in_code_block {
      out.push_str(line);
    } else {
      chunk.push_str(line);
    }
  }

  flush(&mut chunk, &mut out);
  out
}

fn youtube_embed(caps: &Captures) -> String {
  let link = &caps[1];
  let id = &caps[2];
  let title = link.replace("http://", "");
  format!(
    "<iframe width=\"560\" height=\"315\" \
     src=\"http://www.youtube.com/embed/{id}\" frameborder=\"0\" \
     allowfullscreen></iframe><span><a rel=\"nofollow\" \
     href=\"{link}\">{title}</a></span>"
  )
}

fn gist_embed(caps: &Captures) -> String {
  let link = &caps[1];
  let title = link.replace("http://", "").replace("https://", "");
  format!(
    "<script src=\"{link}.js\"></script><span><a rel=\"nofollow\" \
     href=\"{link}\">{title}</a></span>"
  )
}

fn vimeo_embed(caps: &Captures) -> String {
  let link = &caps[1];
  let id = &caps[2];
  let title = link.replace("http://", "");
  format!(
    "<iframe width=\"500\" height=\"281\" frameborder=\"0\" \
     src=\"http://player.vimeo.com/video/{id}\" \
     allowFullScreen></iframe><span><a rel=\"nofollow\" \
     href=\"{link}\">{title}</a></span>"
  )
}

fn screenr_embed(caps: &Captures) -> String {
  let link = &caps[1];
  let id = &caps[2];
  let title = link.replace("http://", "");
  format!(
    "<iframe width=\"500\" height=\"305\" frameborder=\"0\" \
     src=\"http://www.screenr.com/embed/{id}\" \
     allowFullScreen></iframe><span><a rel=\"nofollow\" \
     href=\"{link}\">{title}</a></span>"
  )
}

fn github_commit_link(caps: &Captures) -> String {
  let owner = &caps[1];
  let repo = &caps[2];
  let sha = &caps[3];
  let short = &sha[..7];
  format!(
    "<a rel=\"nofollow\" \
     href=\"https://github.com/{owner}/{repo}/commit/{sha}\">{owner}/\
     {repo}@{short}</a>"
  )
}
