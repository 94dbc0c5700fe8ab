//! CLI for tsgrab.

mod reporter;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tsgrab_core::checksum;
use tsgrab_core::config::{self, GrabConfig};
use tsgrab_core::pipeline::Pipeline;

use reporter::ConsoleReporter;

/// Download a recorded stream embedded in a web page into `<video id>.ts`.
#[derive(Debug, Parser)]
#[command(name = "tsgrab")]
#[command(about = "Download a page's recorded stream as a single .ts file", long_about = None)]
pub struct Cli {
    /// URL of the page embedding the player.
    pub url: String,

    /// Directory for the output file (default: current directory).
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.config/tsgrab/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the SHA-256 of the finished file.
    #[arg(long)]
    pub sha256: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let cfg = load_config(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        let output_dir = match self.output_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("current directory")?,
        };

        let pipeline = Pipeline::from_config(&cfg, &output_dir)?;
        let mut reporter = ConsoleReporter::new();
        let summary = pipeline
            .run(&self.url, &mut reporter)
            .with_context(|| format!("download from {}", self.url))?;

        println!(
            "Saved {} fragments ({} bytes) to {}",
            summary.fragments,
            summary.bytes_written,
            summary.output_path.display()
        );
        if self.sha256 {
            let digest = checksum::sha256_path(&summary.output_path)?;
            println!("{}  {}", digest, summary.output_path.display());
        }
        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<GrabConfig> {
    match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    }
}

#[cfg(test)]
mod tests;
