use crate::foundation::core::{BaseMap, Overlay, Product, Range, Region, Station};
use crate::foundation::error::{RadarError, RadarResult};
use crate::series::align::SeriesFilter;
use crate::session::layers::StaticLayerPlan;
use crate::source::urls;

/// Ranges the standard pipeline can render.
pub const SUPPORTED_RANGES: [Range; 1] = [Range::Short];

/// A listed directory together with the filter applied to its names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListedSeries {
    pub url: String,
    pub filter: SeriesFilter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Standard,
    Lite,
    Mosaic,
}

/// What a session polls and how its frames are layered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Series {
    /// Single station: static base and overlays, with radar, legend and warning series
    /// aligned by timestamp.
    Standard {
        station: Station,
        product: Product,
        range: Range,
    },
    /// Pre-rendered single image for a station.
    Lite {
        station: Station,
        product: Product,
        looped: bool,
    },
    /// Regional mosaic loop from one shared directory.
    Mosaic { region: Region },
}

impl Series {
    pub fn standard(station: &str, product: &str, range: &str) -> RadarResult<Self> {
        let range: Range = range.parse()?;
        if !SUPPORTED_RANGES.contains(&range) {
            return Err(RadarError::invalid_parameter(format!(
                "range {range} not yet supported"
            )));
        }
        Ok(Self::Standard {
            station: Station::new(station)?,
            product: Product::new(product)?,
            range,
        })
    }

    pub fn lite(station: &str, product: &str, looped: bool) -> RadarResult<Self> {
        Ok(Self::Lite {
            station: Station::new(station)?,
            product: Product::new(product)?,
            looped,
        })
    }

    pub fn mosaic(region: &str) -> RadarResult<Self> {
        Ok(Self::Mosaic {
            region: region.parse()?,
        })
    }

    pub fn kind(&self) -> SeriesKind {
        match self {
            Self::Standard { .. } => SeriesKind::Standard,
            Self::Lite { .. } => SeriesKind::Lite,
            Self::Mosaic { .. } => SeriesKind::Mosaic,
        }
    }

    /// Static rasters fetched once per session, if the series has any.
    pub fn static_layers(&self) -> Option<StaticLayerPlan> {
        match self {
            Self::Standard { station, range, .. } => Some(StaticLayerPlan {
                base_url: urls::url_base(BaseMap::Topo, station, *range),
                overlay_urls: Overlay::DRAW_ORDER
                    .iter()
                    .map(|o| urls::url_layer(*o, station, *range))
                    .collect(),
            }),
            Self::Lite { .. } | Self::Mosaic { .. } => None,
        }
    }

    /// Radar, legend and warning directories of a standard series.
    pub fn scan_directories(&self) -> Option<[ListedSeries; 3]> {
        let Self::Standard {
            station,
            product,
            range,
        } = self
        else {
            return None;
        };
        Some([
            ListedSeries {
                url: urls::url_radar(product, station),
                filter: SeriesFilter::none(),
            },
            ListedSeries {
                url: urls::url_legend(product, station),
                filter: SeriesFilter::none(),
            },
            ListedSeries {
                url: urls::url_warning(station, *range),
                filter: SeriesFilter::containing(range.as_str()),
            },
        ])
    }

    /// The single listed directory of a mosaic series.
    pub fn mosaic_directory(&self) -> Option<ListedSeries> {
        let Self::Mosaic { region } = self else {
            return None;
        };
        Some(ListedSeries {
            url: urls::URL_MOSAIC.to_string(),
            filter: SeriesFilter {
                fields: Some(3),
                prefix: Some(region.code().to_string()),
                ..SeriesFilter::default()
            },
        })
    }

    /// Fixed image URL of a lite series.
    pub fn lite_url(&self) -> Option<String> {
        match self {
            Self::Lite {
                station,
                product,
                looped,
            } => Some(urls::url_lite(product, station, *looped)),
            _ => None,
        }
    }

    /// Copies of the last frame appended to the loop.
    pub fn hold_frames(&self) -> usize {
        match self {
            Self::Lite { .. } => 0,
            Self::Standard { .. } | Self::Mosaic { .. } => crate::encode::assemble::HOLD_FRAMES,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/series/variant.rs"]
mod tests;
