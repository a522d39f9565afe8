use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::foundation::error::RadarError;

#[derive(Default)]
struct CountingFetcher {
    calls: AtomicUsize,
    fail: bool,
}

impl ImageFetcher for CountingFetcher {
    fn fetch(&self, url: &str) -> RadarResult<Raster> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RadarError::fetch(url, anyhow!("unreachable")));
        }
        let tag = url.len() as u8;
        Raster::solid(2, 2, [tag, 0, 0, 255])
    }
}

fn plan() -> StaticLayerPlan {
    StaticLayerPlan {
        base_url: "b".to_string(),
        overlay_urls: vec!["o1".to_string(), "o22".to_string()],
    }
}

#[test]
fn fetch_keeps_base_first_and_overlay_order() {
    let fetcher = CountingFetcher::default();
    let layers = StaticLayers::fetch(&plan(), &fetcher).unwrap();
    assert_eq!(layers.base.pixel(0, 0).unwrap()[0], 1);
    let tags: Vec<u8> = layers
        .overlays
        .iter()
        .map(|r| r.pixel(0, 0).unwrap()[0])
        .collect();
    assert_eq!(tags, vec![2, 3]);
}

#[test]
fn cache_fetches_once() {
    let fetcher = CountingFetcher::default();
    let cache = StaticLayerCache::new();
    assert!(!cache.is_initialized());

    let a = cache.get_or_fetch(&plan(), &fetcher).unwrap();
    let b = cache.get_or_fetch(&plan(), &fetcher).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
    assert!(cache.is_initialized());
}

#[test]
fn concurrent_callers_share_one_fetch() {
    let fetcher = CountingFetcher::default();
    let cache = StaticLayerCache::new();
    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| cache.get_or_fetch(&plan(), &fetcher).unwrap());
        }
    });
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn failed_fetch_leaves_cache_empty() {
    let fetcher = CountingFetcher {
        fail: true,
        ..Default::default()
    };
    let cache = StaticLayerCache::new();
    assert!(cache.get_or_fetch(&plan(), &fetcher).is_err());
    assert!(!cache.is_initialized());
}
