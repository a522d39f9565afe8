//! Fetches NWS RIDGE radar imagery and renders it as looping animations.
//!
//! Radar, legend and warning images are published to separate directories and updated
//! independently. A [`RadarSession`] lists all three, keeps only the scan times present in every
//! series, fetches the most recent frames and layers them over a cached base map:
//!
//! base < radar < overlays (County, Highways, Cities, RangeRings) < legend < warning
//!
//! The composited frames are encoded as an infinitely repeating GIF with the last frame held
//! for two extra frames.
//!
//! ```no_run
//! let session = nws_radar::RadarSession::new("ABR", "N0R", "Short", 5)?;
//! session.update()?;
//! let gif = session.image(Some(std::path::Path::new("abr.gif")))?;
//! # Ok::<(), nws_radar::RadarError>(())
//! ```
#![forbid(unsafe_code)]

mod encode;
mod foundation;
mod render;
mod series;
mod session;
mod source;

pub use crate::foundation::core::{
    BaseMap, FrameLimit, Overlay, Product, Range, Region, SUPPORTED_PRODUCTS, Station,
};
pub use crate::foundation::error::{RadarError, RadarResult};

pub use crate::encode::assemble::{
    DEFAULT_FRAME_DURATION_MS, HOLD_FRAMES, LoopEncoder, LoopOpts, PLACEHOLDER_SIZE,
    assemble_loop, encode_loop, encode_loop_timed,
};
pub use crate::encode::gif::GifLoopEncoder;
pub use crate::render::composite::{ScanLayers, compose_frame, compose_frames, composite_stack};
pub use crate::render::raster::{AnimationFrame, Raster, decode_animation, decode_image};
pub use crate::series::align::{FrameSet, SeriesFilter, align_series};
pub use crate::series::filename::TimestampKey;
pub use crate::series::variant::{ListedSeries, SUPPORTED_RANGES, Series, SeriesKind};
pub use crate::session::config::{RadarConfig, SessionOpts};
pub use crate::session::layers::{StaticLayerCache, StaticLayerPlan, StaticLayers};
pub use crate::session::radar_session::{FrameState, RadarSession};
pub use crate::source::frames::{fetch_frames, select_recent};
pub use crate::source::http::{HttpOpts, HttpSource, IMAGE_EXTENSION};
pub use crate::source::listing::extract_links;
pub use crate::source::traits::{FileLister, ImageFetcher};
pub use crate::source::urls;
