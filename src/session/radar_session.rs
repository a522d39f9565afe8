use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use anyhow::{Context, anyhow};
use tracing::{debug, info, warn};

use crate::encode::assemble::{LoopEncoder, encode_loop, encode_loop_timed};
use crate::encode::gif::GifLoopEncoder;
use crate::foundation::core::FrameLimit;
use crate::foundation::error::{RadarError, RadarResult};
use crate::render::composite::compose_frames;
use crate::render::raster::Raster;
use crate::series::align::{FrameSet, align_series};
use crate::series::variant::{ListedSeries, Series};
use crate::session::config::{RadarConfig, SessionOpts};
use crate::session::layers::{StaticLayerCache, StaticLayers};
use crate::source::frames::{fetch_frames, select_recent};
use crate::source::http::{HttpOpts, HttpSource};
use crate::source::traits::{FileLister, ImageFetcher};

/// Output of one successful update cycle.
#[derive(Clone, Debug)]
pub struct FrameState {
    /// Aligned filenames. Mosaic and lite series only populate `radar`.
    pub frame_set: FrameSet,
    /// Composited frames, oldest first, before the loop hold is appended.
    pub frames: Vec<Raster>,
    /// Dimensions of the cached base map, if the series has one.
    pub base_size: Option<(u32, u32)>,
    /// Per-frame display times carried over from an upstream animation. `None` uses the
    /// session frame duration.
    pub delays_ms: Option<Vec<u32>>,
}

#[derive(Debug)]
enum SessionState {
    Uninitialized,
    Ready { cycle: u64, frames: Arc<FrameState> },
}

/// Polls one radar series and renders it as a looping animation.
///
/// Call [`update`](Self::update) to refresh frames and [`image`](Self::image) to encode the
/// most recent successful update. A failed update keeps the previous frames.
pub struct RadarSession {
    series: Series,
    frame_limit: FrameLimit,
    opts: SessionOpts,
    fetcher: Arc<dyn ImageFetcher>,
    lister: Arc<dyn FileLister>,
    encoder: Arc<dyn LoopEncoder>,
    pool: rayon::ThreadPool,
    layers: StaticLayerCache,
    /// Last update cycle started; cycles commit only if nothing newer has.
    cycles: AtomicU64,
    state: RwLock<SessionState>,
}

impl std::fmt::Debug for RadarSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadarSession")
            .field("series", &self.series)
            .field("frame_limit", &self.frame_limit)
            .field("opts", &self.opts)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl RadarSession {
    /// Standard single-station loop backed by HTTP.
    pub fn new(station: &str, product: &str, range: &str, nframes: i64) -> RadarResult<Self> {
        Self::over_http(
            Series::standard(station, product, range)?,
            FrameLimit::new(nframes)?,
            SessionOpts::default(),
        )
    }

    /// Regional mosaic loop backed by HTTP.
    pub fn mosaic(region: &str, nframes: i64) -> RadarResult<Self> {
        Self::over_http(
            Series::mosaic(region)?,
            FrameLimit::new(nframes)?,
            SessionOpts::default(),
        )
    }

    /// Lite single-image product backed by HTTP.
    pub fn lite(station: &str, product: &str, looped: bool) -> RadarResult<Self> {
        Self::over_http(
            Series::lite(station, product, looped)?,
            FrameLimit::new(1)?,
            SessionOpts::default(),
        )
    }

    pub fn from_config(cfg: &RadarConfig) -> RadarResult<Self> {
        Self::over_http(cfg.series()?, cfg.frame_limit()?, cfg.session_opts())
    }

    pub fn over_http(
        series: Series,
        frame_limit: FrameLimit,
        opts: SessionOpts,
    ) -> RadarResult<Self> {
        let http = Arc::new(HttpSource::new(&HttpOpts::default())?);
        Self::with_sources(series, frame_limit, opts, http.clone(), http)
    }

    /// Build a session over arbitrary collaborators.
    pub fn with_sources(
        series: Series,
        frame_limit: FrameLimit,
        opts: SessionOpts,
        fetcher: Arc<dyn ImageFetcher>,
        lister: Arc<dyn FileLister>,
    ) -> RadarResult<Self> {
        opts.validate()?;
        let pool = build_thread_pool(opts.workers)?;
        Ok(Self {
            series,
            frame_limit,
            opts,
            fetcher,
            lister,
            encoder: Arc::new(GifLoopEncoder::default()),
            pool,
            layers: StaticLayerCache::new(),
            cycles: AtomicU64::new(0),
            state: RwLock::new(SessionState::Uninitialized),
        })
    }

    /// Replace the loop encoder (GIF by default).
    pub fn with_encoder(mut self, encoder: Arc<dyn LoopEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn frame_limit(&self) -> FrameLimit {
        self.frame_limit
    }

    /// `true` once an update has succeeded.
    pub fn is_ready(&self) -> bool {
        matches!(self.state.read().as_deref(), Ok(SessionState::Ready { .. }))
    }

    pub fn static_layers_cached(&self) -> bool {
        self.layers.is_initialized()
    }

    /// Frames of the last successful update.
    pub fn snapshot(&self) -> RadarResult<Arc<FrameState>> {
        let state = self
            .state
            .read()
            .map_err(|_| anyhow!("session state lock poisoned"))?;
        match &*state {
            SessionState::Ready { frames, .. } => Ok(Arc::clone(frames)),
            SessionState::Uninitialized => Err(RadarError::NotReady),
        }
    }

    /// Fetch new images and recomposite.
    ///
    /// Static layers are fetched on the first call only. Nothing is committed unless every
    /// listing and fetch succeeds. When updates overlap, a cycle that started earlier never
    /// replaces frames committed by a later one.
    #[tracing::instrument(skip(self), fields(series = ?self.series.kind()))]
    pub fn update(&self) -> RadarResult<()> {
        let cycle = self.cycles.fetch_add(1, Ordering::SeqCst) + 1;

        // Acquire the static layers on the calling thread: a pool worker blocked on the cache
        // lock could otherwise be handed work from the thread that holds it.
        let layers = match self.series.static_layers() {
            Some(plan) => Some(self.layers.get_or_try_init(|| {
                self.pool.install(|| StaticLayers::fetch(&plan, self.fetcher.as_ref()))
            })?),
            None => None,
        };

        let next = self.pool.install(|| match &self.series {
            Series::Standard { .. } => self.refresh_standard(layers.as_deref()),
            Series::Mosaic { .. } => self.refresh_mosaic(),
            Series::Lite { .. } => self.refresh_lite(),
        })?;
        info!(frames = next.frames.len(), "update complete");

        let mut state = self
            .state
            .write()
            .map_err(|_| anyhow!("session state lock poisoned"))?;
        if let SessionState::Ready { cycle: committed, .. } = &*state
            && *committed > cycle
        {
            debug!(cycle, committed = *committed, "discarding stale update");
            return Ok(());
        }
        *state = SessionState::Ready {
            cycle,
            frames: Arc::new(next),
        };
        Ok(())
    }

    /// Encode the current loop, optionally also writing it to `outfile`.
    pub fn image(&self, outfile: Option<&Path>) -> RadarResult<Vec<u8>> {
        let state = self.snapshot()?;
        let opts = self.opts.loop_opts(self.series.hold_frames(), state.base_size);
        let bytes = match &state.delays_ms {
            Some(delays) => encode_loop_timed(self.encoder.as_ref(), &state.frames, delays, &opts)?,
            None => encode_loop(self.encoder.as_ref(), &state.frames, &opts)?,
        };

        if let Some(path) = outfile {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory '{}'", parent.display())
                })?;
            }
            std::fs::write(path, &bytes)
                .with_context(|| format!("write loop image '{}'", path.display()))?;
            debug!(path = %path.display(), bytes = bytes.len(), "wrote loop image");
        }
        Ok(bytes)
    }

    /// Encode the current loop into `sink`.
    pub fn write_image(&self, sink: &mut dyn Write) -> RadarResult<()> {
        let bytes = self.image(None)?;
        sink.write_all(&bytes).context("write loop image to sink")?;
        Ok(())
    }

    fn list(&self, dir: &ListedSeries) -> RadarResult<Vec<String>> {
        let files = self.lister.list_files(&dir.url)?;
        Ok(dir.filter.apply(files))
    }

    fn fetch(&self, dir: &ListedSeries, files: &[String]) -> RadarResult<Vec<Raster>> {
        fetch_frames(self.fetcher.as_ref(), &dir.url, files, self.frame_limit)
    }

    fn refresh_standard(&self, layers: Option<&StaticLayers>) -> RadarResult<FrameState> {
        let (Some(layers), Some([radar_dir, legend_dir, warning_dir])) =
            (layers, self.series.scan_directories())
        else {
            return Err(anyhow!("standard series without static layers or directories").into());
        };

        let (radar, (legend, warning)) = rayon::join(
            || self.list(&radar_dir),
            || rayon::join(|| self.list(&legend_dir), || self.list(&warning_dir)),
        );
        let (radar, legend, warning) = (radar?, legend?, warning?);
        let listed = (radar.len(), legend.len(), warning.len());
        let set = align_series(radar, legend, warning)?;
        set.verify_aligned()?;
        if set.is_empty() && listed != (0, 0, 0) {
            warn!(
                radar = listed.0,
                legend = listed.1,
                warning = listed.2,
                "no timestamps common to all series"
            );
        }

        let (radar, (legend, warning)) = rayon::join(
            || self.fetch(&radar_dir, &set.radar),
            || {
                rayon::join(
                    || self.fetch(&legend_dir, &set.legend),
                    || self.fetch(&warning_dir, &set.warning),
                )
            },
        );
        let frames = compose_frames(&layers.base, &layers.overlays, &radar?, &legend?, &warning?)?;

        Ok(FrameState {
            frame_set: set,
            frames,
            base_size: Some(layers.base.dimensions()),
            delays_ms: None,
        })
    }

    fn refresh_mosaic(&self) -> RadarResult<FrameState> {
        let dir = self
            .series
            .mosaic_directory()
            .ok_or_else(|| anyhow!("mosaic series without a directory"))?;
        let files = self.list(&dir)?;
        let frames = self.fetch(&dir, &files)?;
        let selected = select_recent(&files, self.frame_limit).to_vec();
        Ok(FrameState {
            frame_set: FrameSet {
                radar: selected,
                ..FrameSet::default()
            },
            frames,
            base_size: None,
            delays_ms: None,
        })
    }

    fn refresh_lite(&self) -> RadarResult<FrameState> {
        let url = self
            .series
            .lite_url()
            .ok_or_else(|| anyhow!("lite series without an image url"))?;
        let animation = self.fetcher.fetch_animation(&url)?;
        let name = url.rsplit('/').next().unwrap_or_default().to_string();
        let delays_ms = if animation.len() > 1 {
            animation.iter().map(|f| f.delay_ms).collect::<Option<Vec<_>>>()
        } else {
            None
        };
        debug!(frames = animation.len(), "fetched lite image");
        Ok(FrameState {
            frame_set: FrameSet {
                radar: vec![name],
                ..FrameSet::default()
            },
            frames: animation.into_iter().map(|f| f.raster).collect(),
            base_size: None,
            delays_ms,
        })
    }
}

/// `workers` is already validated by [`SessionOpts::validate`].
fn build_thread_pool(workers: Option<usize>) -> RadarResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("nws-radar-{i}"));
    if let Some(n) = workers {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| RadarError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/radar_session.rs"]
mod tests;
