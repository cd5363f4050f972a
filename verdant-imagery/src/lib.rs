pub mod error;
pub mod fetch;
pub mod geo;
pub mod metadata;
pub mod provider;

pub use error::FetchError;
pub use fetch::{headings, Heading, ImageFetcher, ImageSample, DEFAULT_HEADING, MULTI_HEADINGS};
pub use geo::Coordinate;
pub use metadata::CaptureMetadata;
pub use provider::{FetchOptions, ImageTarget, ImageryProvider, PanoramaMetadata};
