use std::collections::HashSet;

use crate::foundation::error::{RadarError, RadarResult};
use crate::series::filename::{TimestampKey, field_count};

/// Per-series filename filter applied before alignment.
///
/// All configured conditions must hold for a filename to survive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesFilter {
    /// Keep only names containing this substring.
    pub contains: Option<String>,
    /// Keep only names with exactly this many `_`-delimited fields.
    pub fields: Option<usize>,
    /// Keep only names whose first field equals this, ignoring ASCII case.
    pub prefix: Option<String>,
}

impl SeriesFilter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn containing(needle: impl Into<String>) -> Self {
        Self {
            contains: Some(needle.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contains.is_none() && self.fields.is_none() && self.prefix.is_none()
    }

    pub fn accepts(&self, name: &str) -> bool {
        if let Some(needle) = &self.contains
            && !name.contains(needle.as_str())
        {
            return false;
        }
        if let Some(n) = self.fields
            && field_count(name) != n
        {
            return false;
        }
        if let Some(prefix) = &self.prefix {
            let first = name.split('_').next().unwrap_or_default();
            if !first.eq_ignore_ascii_case(prefix) {
                return false;
            }
        }
        true
    }

    /// Filter `files`, preserving order.
    pub fn apply(&self, files: Vec<String>) -> Vec<String> {
        if self.is_empty() {
            return files;
        }
        let before = files.len();
        let kept: Vec<String> = files.into_iter().filter(|f| self.accepts(f)).collect();
        if kept.len() != before {
            tracing::debug!(
                before,
                after = kept.len(),
                filter = ?self,
                "series filter dropped files"
            );
        }
        kept
    }
}

/// Radar, legend and warning filenames for the same scan times.
///
/// After [`align_series`] the three lists have equal length and the i-th entries share a
/// [`TimestampKey`], unless an input listing repeated a key (see [`FrameSet::verify_aligned`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameSet {
    pub radar: Vec<String>,
    pub legend: Vec<String>,
    pub warning: Vec<String>,
}

impl FrameSet {
    pub fn len(&self) -> usize {
        self.radar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radar.is_empty()
    }

    /// Check the equal-length, index-aligned invariant.
    pub fn verify_aligned(&self) -> RadarResult<()> {
        if self.radar.len() != self.legend.len() || self.radar.len() != self.warning.len() {
            return Err(RadarError::alignment(format!(
                "series lengths differ after alignment (radar={}, legend={}, warning={}); \
                 a listing contains duplicate timestamps",
                self.radar.len(),
                self.legend.len(),
                self.warning.len()
            )));
        }
        for ((r, l), w) in self.radar.iter().zip(&self.legend).zip(&self.warning) {
            let kr = TimestampKey::parse(r)?;
            if kr != TimestampKey::parse(l)? || kr != TimestampKey::parse(w)? {
                return Err(RadarError::alignment(format!(
                    "frame '{r}' is not co-timestamped with '{l}' and '{w}'"
                )));
            }
        }
        Ok(())
    }

    /// Timestamp keys of the radar series, in order.
    pub fn keys(&self) -> RadarResult<Vec<TimestampKey>> {
        self.radar.iter().map(|f| TimestampKey::parse(f)).collect()
    }
}

/// Keep only filenames whose timestamp key is present in all three series.
///
/// Each series keeps its original relative order. Any malformed filename fails the whole
/// alignment instead of being dropped, since silently skipping one could shift the series.
pub fn align_series(
    radar: Vec<String>,
    legend: Vec<String>,
    warning: Vec<String>,
) -> RadarResult<FrameSet> {
    let radar = keyed(radar)?;
    let legend = keyed(legend)?;
    let warning = keyed(warning)?;

    let radar_keys = key_set(&radar);
    let legend_keys = key_set(&legend);
    let warning_keys = key_set(&warning);

    let set = FrameSet {
        radar: retain_common(radar, &legend_keys, &warning_keys),
        legend: retain_common(legend, &radar_keys, &warning_keys),
        warning: retain_common(warning, &legend_keys, &radar_keys),
    };
    tracing::debug!(
        radar = set.radar.len(),
        legend = set.legend.len(),
        warning = set.warning.len(),
        "aligned series"
    );
    Ok(set)
}

fn keyed(files: Vec<String>) -> RadarResult<Vec<(TimestampKey, String)>> {
    files
        .into_iter()
        .map(|f| Ok((TimestampKey::parse(&f)?, f)))
        .collect()
}

fn key_set(files: &[(TimestampKey, String)]) -> HashSet<TimestampKey> {
    files.iter().map(|(k, _)| k.clone()).collect()
}

fn retain_common(
    files: Vec<(TimestampKey, String)>,
    a: &HashSet<TimestampKey>,
    b: &HashSet<TimestampKey>,
) -> Vec<String> {
    files
        .into_iter()
        .filter(|(k, _)| a.contains(k) && b.contains(k))
        .map(|(_, f)| f)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/series/align.rs"]
mod tests;
