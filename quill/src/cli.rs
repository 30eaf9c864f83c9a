use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for quill
#[derive(Parser, Debug)]
#[command(author, version, about = "Quill: a blog post renderer")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to configuration file (TOML or JSON)
  #[arg(short = 'c', long = "config-file")]
  pub config_file: Option<PathBuf>,
}

/// All supported subcommands for the quill CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new quill configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "quill.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Render every post in the input directory into HTML pages.
  Build {
    /// Path to the directory containing post source files.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output directory for generated pages.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of threads to use for parallel rendering.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,

    /// Site title, used in templates.
    #[arg(short = 'T', long)]
    title: Option<String>,

    /// Footer text for generated pages.
    #[arg(short = 'f', long)]
    footer: Option<String>,
  },

  /// Render a single post and print or write the result.
  Render {
    /// Path to the post source file.
    file: PathBuf,

    /// Write the rendered page here instead of printing the body HTML.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the full post record (metadata, body, TOC) as JSON.
    #[arg(long)]
    json: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
