use std::time::Duration;

use anyhow::{Context, anyhow};
use reqwest::blocking::Client;
use tracing::debug;

use crate::foundation::error::{RadarError, RadarResult};
use crate::render::raster::{AnimationFrame, Raster, decode_animation, decode_image};
use crate::source::listing::extract_links;
use crate::source::traits::{FileLister, ImageFetcher};

/// Extension of the per-scan images published in listed directories.
pub const IMAGE_EXTENSION: &str = ".gif";

#[derive(Clone, Debug)]
pub struct HttpOpts {
    /// Whole-request timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpOpts {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("nws-radar/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Blocking HTTP implementation of both network collaborators.
#[derive(Clone, Debug)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(opts: &HttpOpts) -> RadarResult<Self> {
        let client = Client::builder()
            .timeout(opts.timeout)
            .user_agent(opts.user_agent.clone())
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }

    fn get_bytes(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {}", status.as_u16()));
        }
        Ok(resp.bytes()?.to_vec())
    }
}

impl ImageFetcher for HttpSource {
    fn fetch(&self, url: &str) -> RadarResult<Raster> {
        let bytes = self
            .get_bytes(url)
            .map_err(|e| RadarError::fetch(url, e))?;
        debug!(url, bytes = bytes.len(), "fetched image");
        decode_image(&bytes).map_err(|e| RadarError::fetch(url, e))
    }

    fn fetch_animation(&self, url: &str) -> RadarResult<Vec<AnimationFrame>> {
        let bytes = self
            .get_bytes(url)
            .map_err(|e| RadarError::fetch(url, e))?;
        let frames = decode_animation(&bytes).map_err(|e| RadarError::fetch(url, e))?;
        debug!(url, bytes = bytes.len(), frames = frames.len(), "fetched animation");
        Ok(frames)
    }
}

impl FileLister for HttpSource {
    fn list_files(&self, dir_url: &str) -> RadarResult<Vec<String>> {
        let bytes = self
            .get_bytes(dir_url)
            .map_err(|e| RadarError::listing(dir_url, e))?;
        let html = String::from_utf8_lossy(&bytes);
        let files = extract_links(&html, IMAGE_EXTENSION);
        debug!(url = dir_url, files = files.len(), "listed directory");
        Ok(files)
    }
}
