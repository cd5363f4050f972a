use crate::error::FetchError;
use crate::fetch::Heading;
use crate::geo::Coordinate;
use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

pub mod street_view;

pub use street_view::StreetViewProvider;

/// Raw metadata-endpoint payload, before defaulting rules are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct PanoramaMetadata {
    pub status: Option<String>,
    pub pano_id: Option<String>,
    pub date: Option<String>,
    pub location: Option<RawLocation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLocation {
    pub lat: f64,
    pub lng: f64,
}

/// How an image request is addressed. A known panorama identifier is
/// preferred over a raw coordinate because it avoids re-snapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageTarget {
    Panorama(String),
    Location(Coordinate),
}

/// Fixed image request parameters.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub width: u32,
    pub height: u32,
    pub fov: u16,
    pub pitch: i16,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            width: 400,
            height: 400,
            fov: 120,
            pitch: 0,
        }
    }
}

/// The imagery-provider capability: one metadata lookup per coordinate and
/// one image lookup per (target, heading).
#[async_trait]
pub trait ImageryProvider: Send + Sync {
    async fn metadata(
        &self,
        coordinate: Coordinate,
        api_key: &str,
    ) -> Result<PanoramaMetadata, FetchError>;

    async fn image(
        &self,
        target: &ImageTarget,
        heading: Heading,
        options: &FetchOptions,
        api_key: &str,
    ) -> Result<Bytes, FetchError>;
}
