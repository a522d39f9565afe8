use rayon::prelude::*;

use crate::foundation::core::FrameLimit;
use crate::foundation::error::RadarResult;
use crate::render::raster::Raster;
use crate::source::traits::ImageFetcher;
use crate::source::urls::join;

/// The trailing `min(limit, len)` entries, oldest first.
pub fn select_recent(files: &[String], limit: FrameLimit) -> &[String] {
    let n = limit.effective(files.len());
    &files[files.len() - n..]
}

/// Fetch the most recent `limit` files under `dir_url`.
///
/// Downloads run in parallel on the current rayon pool; the result keeps the order of the
/// selected window. The first failure aborts the whole batch.
#[tracing::instrument(skip(fetcher, files), fields(listed = files.len()))]
pub fn fetch_frames(
    fetcher: &dyn ImageFetcher,
    dir_url: &str,
    files: &[String],
    limit: FrameLimit,
) -> RadarResult<Vec<Raster>> {
    select_recent(files, limit)
        .par_iter()
        .map(|f| fetcher.fetch(&join(dir_url, f)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/source/frames.rs"]
mod tests;
