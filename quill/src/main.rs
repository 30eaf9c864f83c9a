use std::fs;

use color_eyre::eyre::{Context, Result};
use log::LevelFilter;
use quill_config::Config;

mod cli;
mod site;
mod template;

use cli::{Cli, Commands};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match cli.command {
    Some(Commands::Init {
      output,
      format,
      force,
    }) => {
      Config::generate_default_config(&format, &output, force).wrap_err_with(
        || {
          format!(
            "Failed to generate configuration file: {}",
            output.display()
          )
        },
      )?;
      log::info!(
        "Configuration file created successfully. Edit it to customize your \
         site."
      );
      Ok(())
    },

    Some(Commands::Render { file, output, json }) => {
      let config = Config::load(cli.config_file.as_deref())?;
      render_single(&config, &file, output.as_deref(), json)
    },

    Some(Commands::Build {
      input_dir,
      output_dir,
      jobs,
      title,
      footer,
    }) => {
      let mut config = Config::load(cli.config_file.as_deref())?;
      if input_dir.is_some() {
        config.input_dir = input_dir;
      }
      if let Some(output_dir) = output_dir {
        config.output_dir = output_dir;
      }
      if jobs.is_some() {
        config.jobs = jobs;
      }
      if let Some(title) = title {
        config.title = title;
      }
      if let Some(footer) = footer {
        config.footer_text = footer;
      }
      build(&config)
    },

    // Bare `quill` builds with whatever the config file says
    None => {
      let config = Config::load(cli.config_file.as_deref())?;
      build(&config)
    },
  }
}

/// Run the site build with the thread pool sized from configuration.
fn build(config: &Config) -> Result<()> {
  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build_global()
    .wrap_err("Failed to build thread pool")?;

  site::build_site(config)
}

/// Render one post file to stdout, a page file, or a JSON record.
#[allow(clippy::print_stdout, reason = "Single-file mode writes to stdout")]
fn render_single(
  config: &Config,
  file: &std::path::Path,
  output: Option<&std::path::Path>,
  json: bool,
) -> Result<()> {
  let renderer = site::create_renderer(config)?;
  let source = site::read_post_source(file)?;
  let post = quill_markdown::render_with_recovery(&renderer, &source);

  if json {
    let record = serde_json::to_string_pretty(&post)
      .wrap_err("Failed to serialize post record")?;
    match output {
      Some(path) => fs::write(path, record)?,
      None => println!("{record}"),
    }
    return Ok(());
  }

  match output {
    Some(path) => {
      let page = template::render_page(config, &post)?;
      fs::write(path, page).wrap_err_with(|| {
        format!("Failed to write output HTML: {}", path.display())
      })?;
    },
    None => println!("{}", post.body.html),
  }

  Ok(())
}
