//! Command-line interface.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;

use crate::app::bundle::{BundleFormat, BundleRenderer, display_path};
use crate::app::walk::Walker;
use crate::domain::errors::{SinkError, WalkError};
use crate::infra::clipboard::{OutputSink, SystemClipboard};
use crate::infra::config::Config;
use crate::infra::git;
use crate::infra::ignore::IgnoreMatcher;

/// Copy a source file and its project-local import closure to the clipboard.
#[derive(Debug, Parser)]
#[command(name = "depclip", version, about)]
pub struct Cli {
    /// Entry source file whose import closure is bundled.
    pub entry: PathBuf,

    /// Bundle layout. Defaults to the configured template.
    #[arg(long, value_enum)]
    pub format: Option<BundleFormat>,

    /// Write the rendered bundle to a file as well.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the rendered bundle to stdout instead of the file listing.
    #[arg(long)]
    pub stdout: bool,

    /// Skip the clipboard entirely.
    #[arg(long)]
    pub no_copy: bool,

    /// Override the project-root alias prefix.
    #[arg(long)]
    pub alias: Option<String>,
}

/// Parse arguments, run, and map failures to exit codes. A sink failure exits
/// with 2 so callers can tell "bundle computed but not delivered" apart from
/// computation errors.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let mut sink = SystemClipboard::new();
    match execute(&cli, &mut sink) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            if err.downcast_ref::<SinkError>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

/// Run one bundling pass against an injected output sink.
pub fn execute(cli: &Cli, sink: &mut dyn OutputSink) -> Result<()> {
    let entry = cli
        .entry
        .canonicalize()
        .map_err(|_| WalkError::EntryNotFound(cli.entry.clone()))?;

    let root = git::find_project_root(&entry);
    let config = Config::load(&root)?;

    let alias = cli
        .alias
        .clone()
        .unwrap_or_else(|| config.resolver.alias.clone());
    let format = match cli.format {
        Some(format) => format,
        None => BundleFormat::from_str(&config.export.template())
            .unwrap_or(BundleFormat::Tagged),
    };

    let ignore = IgnoreMatcher::load(&root, &config)?;
    let walker = Walker::new(&root, &alias, &ignore);
    let files = walker.walk(&entry)?;

    let renderer = BundleRenderer::new()?;
    let rendered = renderer.render(&files, &root, format)?;

    if let Some(path) = &cli.output {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
        }
        fs::write(path, &rendered)
            .with_context(|| format!("failed to write bundle to {}", path.display()))?;
    }

    if cli.stdout {
        print!("{rendered}");
    } else {
        println!("Files to be copied:");
        for file in &files {
            println!("- {}", display_path(&root, &file.path));
        }
    }

    if !cli.no_copy && config.export.copy() {
        sink.write(&rendered)?;
        if !cli.stdout {
            println!();
            println!("Copied {} file(s) to clipboard", files.len());
        }
    }

    Ok(())
}
