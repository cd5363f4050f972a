use crate::error::FetchError;
use crate::geo::Coordinate;
use crate::metadata::CaptureMetadata;
use crate::provider::{FetchOptions, ImageTarget, ImageryProvider};
use futures::future;
use image::DynamicImage;
use log::{debug, info};
use std::fmt;

/// Compass viewing angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Heading(pub u16);

impl Heading {
    pub fn degrees(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

pub const DEFAULT_HEADING: Heading = Heading(0);
pub const MULTI_HEADINGS: [Heading; 4] = [Heading(90), Heading(180), Heading(270), Heading(360)];

const SINGLE_HEADING: [Heading; 1] = [DEFAULT_HEADING];

/// The heading set sampled at each coordinate. Order is part of the
/// contract: output records follow it.
pub fn headings(multi_heading: bool) -> &'static [Heading] {
    if multi_heading {
        &MULTI_HEADINGS
    } else {
        &SINGLE_HEADING
    }
}

/// One directional view fetched for a coordinate. `image` is `None` when
/// the provider had no decodable imagery there; the metadata still tells
/// the caller what the provider knew about the location.
#[derive(Debug, Clone)]
pub struct ImageSample {
    pub image: Option<DynamicImage>,
    pub heading: Heading,
    pub metadata: CaptureMetadata,
    pub coordinate: Coordinate,
}

/// Resolves a coordinate to one `ImageSample` per heading through an
/// injected imagery provider. Holds no cache; every call re-queries.
pub struct ImageFetcher<P> {
    provider: P,
    options: FetchOptions,
}

impl<P: ImageryProvider> ImageFetcher<P> {
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, FetchOptions::default())
    }

    pub fn with_options(provider: P, options: FetchOptions) -> Self {
        ImageFetcher { provider, options }
    }

    /// Fetches all headings for one coordinate. Returns exactly
    /// `headings(multi_heading).len()` samples sharing one metadata value,
    /// or a fatal `FetchError` when the provider itself fails.
    pub async fn fetch(
        &self,
        coordinate: Coordinate,
        api_key: &str,
        multi_heading: bool,
    ) -> Result<Vec<ImageSample>, FetchError> {
        let raw = self.provider.metadata(coordinate, api_key).await?;
        let metadata = CaptureMetadata::from_raw(raw, coordinate);

        let target = match &metadata.pano_id {
            Some(id) => ImageTarget::Panorama(id.clone()),
            None => ImageTarget::Location(coordinate),
        };

        let wanted = headings(multi_heading);

        // Headings are independent requests; issue them concurrently and
        // rely on try_join_all to keep heading order in the output.
        let bodies = future::try_join_all(wanted.iter().map(|&heading| {
            let target = &target;
            async move {
                self.provider
                    .image(target, heading, &self.options, api_key)
                    .await
            }
        }))
        .await?;

        let samples = wanted
            .iter()
            .zip(bodies)
            .map(|(&heading, body)| {
                let image = match image::load_from_memory(&body) {
                    Ok(image) => Some(image),
                    Err(err) => {
                        info!("no decodable imagery at {coordinate} heading {heading}: {err}");
                        None
                    }
                };
                ImageSample {
                    image,
                    heading,
                    metadata: metadata.clone(),
                    coordinate,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "fetched {} sample(s) at {coordinate} ({} with imagery)",
            samples.len(),
            samples.iter().filter(|s| s.image.is_some()).count()
        );
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{PanoramaMetadata, RawLocation};
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::io::Cursor;
    use std::sync::Mutex;

    struct StubProvider {
        pano_id: Option<String>,
        image_body: Bytes,
        targets: Mutex<Vec<ImageTarget>>,
    }

    impl StubProvider {
        fn new(pano_id: Option<&str>, image_body: Bytes) -> Self {
            StubProvider {
                pano_id: pano_id.map(String::from),
                image_body,
                targets: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ImageryProvider for StubProvider {
        async fn metadata(
            &self,
            _coordinate: Coordinate,
            _api_key: &str,
        ) -> Result<PanoramaMetadata, FetchError> {
            Ok(PanoramaMetadata {
                status: Some("OK".into()),
                pano_id: self.pano_id.clone(),
                date: Some("2021-06".into()),
                location: Some(RawLocation {
                    lat: 52.5201,
                    lng: 13.4051,
                }),
            })
        }

        async fn image(
            &self,
            target: &ImageTarget,
            _heading: Heading,
            _options: &FetchOptions,
            _api_key: &str,
        ) -> Result<Bytes, FetchError> {
            self.targets.lock().unwrap().push(target.clone());
            Ok(self.image_body.clone())
        }
    }

    fn png_bytes() -> Bytes {
        let mut buffer = Vec::new();
        DynamicImage::new_rgb8(4, 4)
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buffer)
    }

    #[tokio::test]
    async fn multi_heading_yields_four_samples_in_order() {
        let fetcher = ImageFetcher::new(StubProvider::new(Some("pano-1"), png_bytes()));
        let samples = fetcher
            .fetch(Coordinate::new(52.52, 13.405), "key", true)
            .await
            .unwrap();

        assert_eq!(samples.len(), 4);
        let order = samples.iter().map(|s| s.heading).collect::<Vec<_>>();
        assert_eq!(order, MULTI_HEADINGS);
        assert!(samples.iter().all(|s| s.image.is_some()));
        assert!(samples.iter().all(|s| s.metadata == samples[0].metadata));
    }

    #[tokio::test]
    async fn single_heading_yields_one_sample() {
        let fetcher = ImageFetcher::new(StubProvider::new(Some("pano-1"), png_bytes()));
        let samples = fetcher
            .fetch(Coordinate::new(52.52, 13.405), "key", false)
            .await
            .unwrap();

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].heading, DEFAULT_HEADING);
    }

    #[tokio::test]
    async fn known_panorama_addresses_requests_by_pano_id() {
        let provider = StubProvider::new(Some("pano-1"), png_bytes());
        let fetcher = ImageFetcher::new(provider);
        fetcher
            .fetch(Coordinate::new(52.52, 13.405), "key", true)
            .await
            .unwrap();

        let targets = fetcher.provider.targets.lock().unwrap();
        assert!(targets
            .iter()
            .all(|t| *t == ImageTarget::Panorama("pano-1".into())));
    }

    #[tokio::test]
    async fn missing_panorama_addresses_requests_by_coordinate() {
        let coordinate = Coordinate::new(52.52, 13.405);
        let fetcher = ImageFetcher::new(StubProvider::new(None, png_bytes()));
        fetcher.fetch(coordinate, "key", false).await.unwrap();

        let targets = fetcher.provider.targets.lock().unwrap();
        assert_eq!(targets.as_slice(), [ImageTarget::Location(coordinate)]);
    }

    #[tokio::test]
    async fn undecodable_body_yields_absent_image_not_error() {
        let body = Bytes::from_static(b"Sorry, we have no imagery here.");
        let fetcher = ImageFetcher::new(StubProvider::new(Some("pano-1"), body));
        let samples = fetcher
            .fetch(Coordinate::new(52.52, 13.405), "key", true)
            .await
            .unwrap();

        assert_eq!(samples.len(), 4);
        assert!(samples.iter().all(|s| s.image.is_none()));
        assert!(samples.iter().all(|s| s.metadata.pano_id.is_some()));
    }
}
