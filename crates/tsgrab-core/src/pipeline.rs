//! The four-stage run: page -> identifier -> fragment list -> output file.

use crate::config::GrabConfig;
use crate::downloader::download_fragments;
use crate::error::GrabResult;
use crate::extract::IdentifierExtractor;
use crate::http::HttpClient;
use crate::manifest::list_fragments;
use crate::page::fetch_page;
use crate::progress::Reporter;
use crate::url_template::UrlTemplate;
use std::path::{Path, PathBuf};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub video_id: String,
    pub output_path: PathBuf,
    pub fragments: usize,
    pub bytes_written: u64,
}

/// `<video_id>.ts` inside `dir`.
pub fn output_path(dir: &Path, video_id: &str) -> PathBuf {
    dir.join(format!("{}.ts", video_id))
}

/// Everything a run needs, built once from config.
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: HttpClient,
    extractor: IdentifierExtractor,
    manifest_template: UrlTemplate,
    fragment_template: UrlTemplate,
    output_dir: PathBuf,
}

impl Pipeline {
    pub fn from_config(cfg: &GrabConfig, output_dir: &Path) -> GrabResult<Self> {
        Ok(Self {
            client: HttpClient::from_config(cfg),
            extractor: IdentifierExtractor::new(&cfg.extract)?,
            manifest_template: cfg.manifest_template(),
            fragment_template: cfg.fragment_template(),
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Runs all stages in order. The first error aborts; nothing is retried
    /// and a partially written output file is left in place.
    pub fn run(&self, source_url: &str, reporter: &mut dyn Reporter) -> GrabResult<RunSummary> {
        reporter.status("Fetching page...");
        let page = fetch_page(&self.client, source_url)?;

        reporter.status("Parsing page...");
        let video_id = self.extractor.extract(&page)?;
        reporter.status(&format!("Found vid: {}", video_id));

        reporter.status(&format!("Detecting fragments for {}", video_id));
        let fragments = list_fragments(&self.client, &self.manifest_template, &video_id)?;

        let path = output_path(&self.output_dir, &video_id);
        let bytes_written = download_fragments(
            &self.client,
            &self.fragment_template,
            &video_id,
            &fragments,
            &path,
            reporter,
        )?;

        tracing::info!(
            video_id = %video_id,
            fragments = fragments.len(),
            bytes = bytes_written,
            "run complete"
        );
        Ok(RunSummary {
            video_id,
            output_path: path,
            fragments: fragments.len(),
            bytes_written,
        })
    }
}
