use std::fmt;

use crate::foundation::error::{RadarError, RadarResult};

/// Correlation key shared by images of the same scan time across series.
///
/// Both parts are opaque and compared for exact, case-sensitive equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimestampKey {
    pub date: String,
    pub time: String,
}

impl TimestampKey {
    /// Extract fields 1 and 2 of `<prefix>_<date>_<time>_<suffix>`.
    pub fn parse(filename: &str) -> RadarResult<Self> {
        let mut fields = filename.split('_');
        let _prefix = fields.next();
        match (fields.next(), fields.next()) {
            (Some(date), Some(time)) => Ok(Self {
                date: date.to_string(),
                time: time.to_string(),
            }),
            _ => Err(RadarError::malformed_filename(filename)),
        }
    }
}

impl fmt::Display for TimestampKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.date, self.time)
    }
}

/// Number of `_`-delimited fields in a filename.
pub fn field_count(filename: &str) -> usize {
    filename.split('_').count()
}

#[cfg(test)]
#[path = "../../tests/unit/series/filename.rs"]
mod tests;
