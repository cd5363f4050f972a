use crate::geo::Coordinate;
use crate::provider::PanoramaMetadata;
use chrono::NaiveDate;
use log::debug;

/// Capture metadata for one coordinate query, shared by every heading
/// sampled at that coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureMetadata {
    /// Opaque token addressing the panorama, when the provider has one.
    pub pano_id: Option<String>,
    /// Capture month, pinned to the first day.
    pub date: Option<NaiveDate>,
    /// The provider's snapped location, or the query coordinate when the
    /// provider reports none.
    pub location: Coordinate,
}

impl CaptureMetadata {
    pub fn from_raw(raw: PanoramaMetadata, query: Coordinate) -> Self {
        let location = raw
            .location
            .map(|l| Coordinate::new(l.lat, l.lng))
            .unwrap_or(query);

        CaptureMetadata {
            pano_id: raw.pano_id,
            date: raw.date.as_deref().and_then(parse_capture_date),
            location,
        }
    }
}

/// Parses the provider's "YYYY-MM" capture date. Absent or malformed input
/// yields `None` rather than an error.
pub fn parse_capture_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(err) => {
            debug!("unparsable capture date {raw:?}: {err}");
            None
        }
    }
}
