//! URL construction for the RIDGE image repository.
//!
//! Every builder takes already-validated domain types, so the only failure left is a
//! parameter combination the repository does not publish.

use crate::foundation::core::{BaseMap, Overlay, Product, Range, Station};

/// Directory holding the regional mosaic loops.
pub const URL_MOSAIC: &str = "https://radar.weather.gov/ridge/Conus/RadarImg/";

/// Static base map raster, e.g. `.../Overlays/Topo/Short/ABR_Topo_Short.jpg`.
pub fn url_base(base: BaseMap, station: &Station, range: Range) -> String {
    format!(
        "http://radar.weather.gov/ridge/Overlays/{base}/{range}/{station}_{base}_{range}.jpg",
        base = base.as_str(),
    )
}

/// Static overlay raster, e.g. `.../Overlays/Cities/Short/ABR_City_Short.gif`.
pub fn url_layer(overlay: Overlay, station: &Station, range: Range) -> String {
    format!(
        "http://radar.weather.gov/ridge/Overlays/{dir}/{range}/{station}_{file}_{range}.gif",
        dir = overlay.as_str(),
        file = overlay.file_stem(),
    )
}

/// Directory listing of per-scan radar images.
pub fn url_radar(product: &Product, station: &Station) -> String {
    format!("https://radar.weather.gov/ridge/RadarImg/{product}/{station}/")
}

/// Directory listing of per-scan legend images.
pub fn url_legend(product: &Product, station: &Station) -> String {
    format!("http://radar.weather.gov/ridge/Legend/{product}/{station}/")
}

/// Directory listing of per-scan warning overlays.
pub fn url_warning(station: &Station, range: Range) -> String {
    format!("http://radar.weather.gov/ridge/Warnings/{range}/{station}/")
}

/// Pre-rendered lite image; `looped` selects the animated variant.
pub fn url_lite(product: &Product, station: &Station, looped: bool) -> String {
    let frame = if looped { "loop" } else { "0" };
    format!("https://radar.weather.gov/lite/{product}/{station}_{frame}.gif")
}

/// Join a directory URL and a listed file name.
pub fn join(dir_url: &str, file: &str) -> String {
    let mut url = String::with_capacity(dir_url.len() + file.len());
    url.push_str(dir_url);
    url.push_str(file);
    url
}

#[cfg(test)]
#[path = "../../tests/unit/source/urls.rs"]
mod tests;
