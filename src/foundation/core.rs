use std::{fmt, str::FromStr};

use crate::foundation::error::{RadarError, RadarResult};

/// Radar products served by the RIDGE image repository.
pub const SUPPORTED_PRODUCTS: [&str; 7] = ["N0R", "N0S", "N0V", "N0Z", "N1P", "NCR", "NTP"];

/// Ground radar site identifier, normalized to upper case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Station(String);

impl Station {
    /// Validate a 3-4 character alphanumeric site id.
    pub fn new(id: impl AsRef<str>) -> RadarResult<Self> {
        let id = id.as_ref().trim();
        if !(3..=4).contains(&id.len()) || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(RadarError::invalid_parameter(format!(
                "station '{id}' must be 3-4 ascii alphanumeric characters"
            )));
        }
        Ok(Self(id.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Station {
    type Error = RadarError;

    fn try_from(value: String) -> RadarResult<Self> {
        Self::new(value)
    }
}

impl From<Station> for String {
    fn from(value: Station) -> Self {
        value.0
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Radar product/layer type, e.g. `N0R` (base reflectivity).
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Product(String);

impl Product {
    pub fn new(code: impl AsRef<str>) -> RadarResult<Self> {
        let code = code.as_ref().trim().to_ascii_uppercase();
        if !SUPPORTED_PRODUCTS.contains(&code.as_str()) {
            return Err(RadarError::invalid_parameter(format!(
                "product '{code}' not in supported values: {SUPPORTED_PRODUCTS:?}"
            )));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Product {
    type Error = RadarError;

    fn try_from(value: String) -> RadarResult<Self> {
        Self::new(value)
    }
}

impl From<Product> for String {
    fn from(value: Product) -> Self {
        value.0
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Distance range of a station image set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Range {
    Short,
    Long,
}

impl Range {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Long => "Long",
        }
    }
}

impl FromStr for Range {
    type Err = RadarError;

    fn from_str(s: &str) -> RadarResult<Self> {
        match s {
            "Short" => Ok(Self::Short),
            "Long" => Ok(Self::Long),
            other => Err(RadarError::invalid_parameter(format!(
                "{other} not valid range"
            ))),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base map raster kinds. Only topography is published.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseMap {
    Topo,
}

impl BaseMap {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Topo => "Topo",
        }
    }
}

impl FromStr for BaseMap {
    type Err = RadarError;

    fn from_str(s: &str) -> RadarResult<Self> {
        match s {
            "Topo" => Ok(Self::Topo),
            other => Err(RadarError::invalid_parameter(format!(
                "{other} not valid base map"
            ))),
        }
    }
}

/// Static overlay rasters drawn above the radar layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Overlay {
    Cities,
    County,
    Highways,
    RangeRings,
}

impl Overlay {
    /// Draw order of the overlays in a standard loop, bottom first.
    pub const DRAW_ORDER: [Overlay; 4] = [
        Overlay::County,
        Overlay::Highways,
        Overlay::Cities,
        Overlay::RangeRings,
    ];

    /// Directory name in the overlay repository.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cities => "Cities",
            Self::County => "County",
            Self::Highways => "Highways",
            Self::RangeRings => "RangeRings",
        }
    }

    /// Layer name embedded in the overlay's file name.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Cities => "City",
            Self::County => "County",
            Self::Highways => "Highways",
            Self::RangeRings => "RangeRing",
        }
    }
}

impl FromStr for Overlay {
    type Err = RadarError;

    fn from_str(s: &str) -> RadarResult<Self> {
        match s {
            "Cities" => Ok(Self::Cities),
            "County" => Ok(Self::County),
            "Highways" => Ok(Self::Highways),
            "RangeRings" => Ok(Self::RangeRings),
            other => Err(RadarError::invalid_parameter(format!(
                "{other} not valid overlay"
            ))),
        }
    }
}

/// Regional mosaic areas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    NatAk,
    NatPr,
    Nat,
    CentGrtLakes,
    GreatLakes,
    Hawaii,
    Northeast,
    NorthRockies,
    PacNorthwest,
    PacSouthwest,
    Southeast,
    SouthMissVly,
    SouthPlains,
    SouthRockies,
    UpperMissVly,
}

impl Region {
    pub const ALL: [Region; 15] = [
        Region::NatAk,
        Region::NatPr,
        Region::Nat,
        Region::CentGrtLakes,
        Region::GreatLakes,
        Region::Hawaii,
        Region::Northeast,
        Region::NorthRockies,
        Region::PacNorthwest,
        Region::PacSouthwest,
        Region::Southeast,
        Region::SouthMissVly,
        Region::SouthPlains,
        Region::SouthRockies,
        Region::UpperMissVly,
    ];

    /// Upper-case code used as the mosaic filename prefix.
    pub fn code(self) -> &'static str {
        match self {
            Self::NatAk => "NATAK",
            Self::NatPr => "NATPR",
            Self::Nat => "NAT",
            Self::CentGrtLakes => "CENTGRTLAKES",
            Self::GreatLakes => "GREATLAKES",
            Self::Hawaii => "HAWAII",
            Self::Northeast => "NORTHEAST",
            Self::NorthRockies => "NORTHROCKIES",
            Self::PacNorthwest => "PACNORTHWEST",
            Self::PacSouthwest => "PACSOUTHWEST",
            Self::Southeast => "SOUTHEAST",
            Self::SouthMissVly => "SOUTHMISSVLY",
            Self::SouthPlains => "SOUTHPLAINS",
            Self::SouthRockies => "SOUTHROCKIES",
            Self::UpperMissVly => "UPPERMISSVLY",
        }
    }
}

impl FromStr for Region {
    type Err = RadarError;

    fn from_str(s: &str) -> RadarResult<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|r| r.code() == upper)
            .ok_or_else(|| {
                let codes: Vec<&str> = Self::ALL.iter().map(|r| r.code()).collect();
                RadarError::invalid_parameter(format!("{s} not in supported values: {codes:?}"))
            })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Upper bound on how many of the most recent frames are materialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameLimit(usize);

impl FrameLimit {
    /// Accepts a signed count so that negative input is rejected rather than wrapped.
    pub fn new(nframes: i64) -> RadarResult<Self> {
        if nframes < 0 {
            return Err(RadarError::invalid_parameter(format!(
                "nframes must be nonnegative, got {nframes}"
            )));
        }
        let n = usize::try_from(nframes)
            .map_err(|_| RadarError::invalid_parameter(format!("nframes {nframes} too large")))?;
        Ok(Self(n))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// `min(limit, available)`.
    pub fn effective(self, available: usize) -> usize {
        self.0.min(available)
    }
}

impl Default for FrameLimit {
    fn default() -> Self {
        Self(5)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
