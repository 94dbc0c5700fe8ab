use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::url_template::{UrlTemplate, FRAGMENT_ID, VIDEO_ID};

pub const DEFAULT_MANIFEST_URL: &str =
    "https://edge8.xmediaget.com:743/edge1/xrecord/{VIDEO_ID}/prog_index.m3u8";
pub const DEFAULT_FRAGMENT_URL: &str =
    "https://edge8.xmediaget.com:743/edge1/xrecord/{VIDEO_ID}/{FRAGMENT_ID}";

/// Fixed request headers sent with every GET (page, manifest and fragments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderConfig {
    pub origin: String,
    pub referer: String,
    pub user_agent: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            origin: "https://streamsport365.com".to_string(),
            referer: "https://streamsport365.com".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

impl HeaderConfig {
    /// Header lines in `Name: value` form, in a stable order.
    pub fn to_lines(&self) -> Vec<String> {
        vec![
            format!("Origin: {}", self.origin.trim()),
            format!("Referer: {}", self.referer.trim()),
            format!("User-Agent: {}", self.user_agent.trim()),
        ]
    }
}

/// How the video identifier is located inside the page's scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Substring a `<script>` element must contain to qualify.
    pub marker: String,
    /// Regex with one capture group holding the identifier digits.
    pub identifier_pattern: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            marker: "VideoCore_WS.VideoPlayerCore.Create(config)".to_string(),
            identifier_pattern: r#"Source:."([0-9]+)""#.to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/tsgrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrabConfig {
    /// Manifest URL; `{VIDEO_ID}` is replaced literally.
    pub manifest_url_template: String,
    /// Fragment URL; `{VIDEO_ID}` and `{FRAGMENT_ID}` are replaced literally.
    pub fragment_url_template: String,
    /// Size of each write to the output file, in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Optional connect timeout in seconds. Unset means wait forever.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default)]
    pub headers: HeaderConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// Receive buffer bounds libcurl honors without clamping.
pub const MIN_CHUNK_SIZE: usize = 1024;
pub const MAX_CHUNK_SIZE: usize = 512 * 1024;

fn default_chunk_size() -> usize {
    64 * 1024
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            manifest_url_template: DEFAULT_MANIFEST_URL.to_string(),
            fragment_url_template: DEFAULT_FRAGMENT_URL.to_string(),
            chunk_size: default_chunk_size(),
            connect_timeout_secs: None,
            headers: HeaderConfig::default(),
            extract: ExtractConfig::default(),
        }
    }
}

impl GrabConfig {
    /// Rejects templates missing their placeholders and a chunk size curl would clamp.
    pub fn validate(&self) -> Result<()> {
        if !self.manifest_url_template.contains(VIDEO_ID) {
            anyhow::bail!("manifest_url_template must contain {}", VIDEO_ID);
        }
        if !self.fragment_url_template.contains(VIDEO_ID)
            || !self.fragment_url_template.contains(FRAGMENT_ID)
        {
            anyhow::bail!(
                "fragment_url_template must contain {} and {}",
                VIDEO_ID,
                FRAGMENT_ID
            );
        }
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            anyhow::bail!(
                "chunk_size must be between {} and {} bytes, got {}",
                MIN_CHUNK_SIZE,
                MAX_CHUNK_SIZE,
                self.chunk_size
            );
        }
        Ok(())
    }

    pub fn manifest_template(&self) -> UrlTemplate {
        UrlTemplate::new(&self.manifest_url_template)
    }

    pub fn fragment_template(&self) -> UrlTemplate {
        UrlTemplate::new(&self.fragment_url_template)
    }
}

/// Existing `config.toml` under the XDG config dirs, if any.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tsgrab")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from the default location. Nothing is written: when no
/// file exists the built-in defaults are used.
pub fn load() -> Result<GrabConfig> {
    match config_path()? {
        Some(path) => load_from_path(&path),
        None => {
            tracing::debug!("no config file, using defaults");
            Ok(GrabConfig::default())
        }
    }
}

/// Load and validate configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<GrabConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: GrabConfig = toml::from_str(&data)
        .with_context(|| format!("parse config: {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
