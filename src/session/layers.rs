use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use rayon::prelude::*;

use crate::foundation::error::RadarResult;
use crate::render::raster::Raster;
use crate::source::traits::ImageFetcher;

/// URLs of the static rasters of one series, base first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticLayerPlan {
    pub base_url: String,
    pub overlay_urls: Vec<String>,
}

/// Base map plus overlays in draw order. Never mutated once fetched.
#[derive(Clone, Debug)]
pub struct StaticLayers {
    pub base: Raster,
    pub overlays: Vec<Raster>,
}

impl StaticLayers {
    pub fn fetch(plan: &StaticLayerPlan, fetcher: &dyn ImageFetcher) -> RadarResult<Self> {
        let urls: Vec<&str> = std::iter::once(plan.base_url.as_str())
            .chain(plan.overlay_urls.iter().map(String::as_str))
            .collect();
        let mut rasters = urls
            .par_iter()
            .map(|url| fetcher.fetch(url))
            .collect::<RadarResult<Vec<_>>>()?;
        let overlays = rasters.split_off(1);
        let base = rasters
            .pop()
            .ok_or_else(|| anyhow!("static layer fetch returned no base raster"))?;
        tracing::info!(
            width = base.width,
            height = base.height,
            overlays = overlays.len(),
            "fetched static layers"
        );
        Ok(Self { base, overlays })
    }
}

/// Once-only cache of a session's static layers.
///
/// The lock is held across the fetch, so overlapping callers wait for the first fetch instead
/// of issuing their own. A failed fetch leaves the cache empty for the next attempt.
#[derive(Debug, Default)]
pub struct StaticLayerCache {
    slot: Mutex<Option<Arc<StaticLayers>>>,
}

impl StaticLayerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_fetch(
        &self,
        plan: &StaticLayerPlan,
        fetcher: &dyn ImageFetcher,
    ) -> RadarResult<Arc<StaticLayers>> {
        self.get_or_try_init(|| StaticLayers::fetch(plan, fetcher))
    }

    /// Return the cached layers or run `init` to produce them.
    ///
    /// `init` runs with the cache lock held and must not call back into this cache.
    pub fn get_or_try_init(
        &self,
        init: impl FnOnce() -> RadarResult<StaticLayers>,
    ) -> RadarResult<Arc<StaticLayers>> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow!("static layer cache lock poisoned"))?;
        if let Some(layers) = slot.as_ref() {
            return Ok(Arc::clone(layers));
        }
        let layers = Arc::new(init()?);
        *slot = Some(Arc::clone(&layers));
        Ok(layers)
    }

    /// Cached layers, if the first fetch has completed.
    pub fn get(&self) -> Option<Arc<StaticLayers>> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.get().is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/layers.rs"]
mod tests;
