use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::encode::assemble::{DEFAULT_FRAME_DURATION_MS, LoopOpts, PLACEHOLDER_SIZE};
use crate::foundation::core::FrameLimit;
use crate::foundation::error::{RadarError, RadarResult};
use crate::series::variant::{Series, SeriesKind};

/// Execution options shared by all series kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOpts {
    /// Fetch worker threads. `None` uses rayon defaults.
    pub workers: Option<usize>,
    pub frame_duration_ms: u32,
    /// Placeholder size used only while no base raster is known.
    pub placeholder_size: (u32, u32),
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            workers: None,
            frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
            placeholder_size: PLACEHOLDER_SIZE,
        }
    }
}

impl SessionOpts {
    pub fn validate(&self) -> RadarResult<()> {
        if self.workers == Some(0) {
            return Err(RadarError::validation(
                "session 'workers' must be >= 1 when set",
            ));
        }
        if self.frame_duration_ms == 0 {
            return Err(RadarError::validation(
                "session 'frame_duration_ms' must be non-zero",
            ));
        }
        let (w, h) = self.placeholder_size;
        if w == 0 || h == 0 {
            return Err(RadarError::validation(
                "session placeholder width/height must be non-zero",
            ));
        }
        Ok(())
    }

    pub(crate) fn loop_opts(&self, hold_frames: usize, base: Option<(u32, u32)>) -> LoopOpts {
        LoopOpts {
            hold_frames,
            frame_duration_ms: self.frame_duration_ms,
            placeholder_size: base.unwrap_or(self.placeholder_size),
        }
    }
}

fn default_range() -> String {
    "Short".to_string()
}

fn default_frames() -> i64 {
    5
}

fn default_looped() -> bool {
    true
}

/// JSON session description.
///
/// ```json
/// { "variant": "standard", "station": "ABR", "product": "N0R", "range": "Short", "frames": 5 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RadarConfig {
    #[serde(default = "default_variant")]
    pub variant: SeriesKind,
    #[serde(default)]
    pub station: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "default_frames")]
    pub frames: i64,
    #[serde(default = "default_looped")]
    pub looped: bool,
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub frame_duration_ms: Option<u32>,
}

fn default_variant() -> SeriesKind {
    SeriesKind::Standard
}

impl RadarConfig {
    pub fn from_json_str(s: &str) -> RadarResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| RadarError::invalid_parameter(format!("parse radar config: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> RadarResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open radar config '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            RadarError::invalid_parameter(format!(
                "parse radar config '{}': {e}",
                path.display()
            ))
        })
    }

    pub fn series(&self) -> RadarResult<Series> {
        match self.variant {
            SeriesKind::Standard => {
                Series::standard(self.require_station()?, self.require_product()?, &self.range)
            }
            SeriesKind::Lite => Series::lite(
                self.require_station()?,
                self.require_product()?,
                self.looped,
            ),
            SeriesKind::Mosaic => {
                let region = self.region.as_deref().ok_or_else(|| {
                    RadarError::invalid_parameter("mosaic config requires 'region'")
                })?;
                Series::mosaic(region)
            }
        }
    }

    pub fn frame_limit(&self) -> RadarResult<FrameLimit> {
        FrameLimit::new(self.frames)
    }

    pub fn session_opts(&self) -> SessionOpts {
        let defaults = SessionOpts::default();
        SessionOpts {
            workers: self.workers,
            frame_duration_ms: self.frame_duration_ms.unwrap_or(defaults.frame_duration_ms),
            ..defaults
        }
    }

    fn require_station(&self) -> RadarResult<&str> {
        self.station
            .as_deref()
            .ok_or_else(|| RadarError::invalid_parameter("config requires 'station'"))
    }

    fn require_product(&self) -> RadarResult<&str> {
        self.product
            .as_deref()
            .ok_or_else(|| RadarError::invalid_parameter("config requires 'product'"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
