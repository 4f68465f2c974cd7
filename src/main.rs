//! apidoc — generate an API reference page from documentation comments.
//!
//! Two modes:
//!
//! - **stdout mode**: `apidoc comments.json` (or comments on stdin)
//! - **directory mode**: `apidoc -o docs comments.json` writes `index.html`
//!   plus assets

use anyhow::{Context, Result};
use apidoc::model::Comment;
use apidoc::{assets, pipeline, render, Config};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "apidoc",
    about = "Generate an API reference from parsed documentation comments"
)]
struct Cli {
    /// JSON file holding the comment array. If omitted, reads from stdin.
    comments: Option<PathBuf>,

    /// Output directory. If omitted, the document is written to stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output format: html (default), json
    #[arg(short = 'f', long, default_value = "html")]
    format: String,

    /// Source root(s); the first one anchors namespace paths.
    /// Replaces `input` from the config file.
    #[arg(long)]
    input: Vec<String>,

    /// Directory of extra static assets to copy (directory mode only)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Project name shown in the page title
    #[arg(long)]
    name: Option<String>,

    /// Project version shown in the page title
    #[arg(long)]
    project_version: Option<String>,

    /// Include @internal items in output
    #[arg(long)]
    show_internal: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let renderer = render::create_renderer(&cli.format)?;
    let config = load_config(&cli)?;
    let mut comments = read_comments(&cli)?;

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let ctx = pipeline::run(&mut comments, &config, &cwd);
    let document = renderer.render(&ctx)?;

    let Some(output_dir) = cli.output.as_deref() else {
        print!("{}", document);
        return Ok(());
    };

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;
    let out_path = output_dir.join(format!("index.{}", renderer.file_extension()));
    fs::write(&out_path, &document)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(path = %out_path.display(), "wrote document");

    let written = assets::write_assets(output_dir, cli.assets.as_deref())?;
    info!(count = written, "wrote assets");
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Config file first, then command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if !cli.input.is_empty() {
        config.input = cli.input.clone();
    }
    if cli.name.is_some() {
        config.project_name = cli.name.clone();
    }
    if cli.project_version.is_some() {
        config.project_version = cli.project_version.clone();
    }
    if cli.show_internal {
        config.show_internal = true;
    }
    Ok(config)
}

fn read_comments(cli: &Cli) -> Result<Vec<Comment>> {
    match cli.comments.as_deref() {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse comments from {}", path.display()))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            serde_json::from_str(&input).context("failed to parse comments from stdin")
        }
    }
}
