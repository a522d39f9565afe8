use crate::foundation::error::RadarResult;
use crate::render::raster::{AnimationFrame, Raster};

/// Retrieves and decodes a single image.
///
/// Failures are reported as [`RadarError::Fetch`](crate::RadarError::Fetch) carrying the URL.
/// Timeouts and any retry policy belong to the implementation.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> RadarResult<Raster>;

    /// Retrieve every frame of a possibly animated image, oldest first.
    ///
    /// The default treats the source as a still image.
    fn fetch_animation(&self, url: &str) -> RadarResult<Vec<AnimationFrame>> {
        Ok(vec![AnimationFrame {
            raster: self.fetch(url)?,
            delay_ms: None,
        }])
    }
}

/// Enumerates the image files published in a directory.
///
/// Contract: names are returned in chronological order (oldest first), which the frame
/// fetcher relies on when it takes the trailing window of most recent frames. Failures are
/// reported as [`RadarError::Listing`](crate::RadarError::Listing).
pub trait FileLister: Send + Sync {
    fn list_files(&self, dir_url: &str) -> RadarResult<Vec<String>>;
}
