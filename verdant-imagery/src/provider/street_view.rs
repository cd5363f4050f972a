use crate::error::FetchError;
use crate::fetch::Heading;
use crate::geo::Coordinate;
use crate::provider::{FetchOptions, ImageTarget, ImageryProvider, PanoramaMetadata};
use async_trait::async_trait;
use bytes::Bytes;
use log::debug;

const METADATA_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/streetview/metadata";
const IMAGE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/streetview";

const STATUS_REQUEST_DENIED: &str = "REQUEST_DENIED";

/// Google Street View Static API client.
pub struct StreetViewProvider {
    client: reqwest::Client,
}

impl StreetViewProvider {
    pub fn new() -> Self {
        StreetViewProvider {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for StreetViewProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageryProvider for StreetViewProvider {
    async fn metadata(
        &self,
        coordinate: Coordinate,
        api_key: &str,
    ) -> Result<PanoramaMetadata, FetchError> {
        let response = self
            .client
            .get(METADATA_ENDPOINT)
            .query(&[("location", coordinate.to_string()), ("key", api_key.into())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let metadata: PanoramaMetadata =
            serde_json::from_str(&body).map_err(|err| FetchError::Metadata(err.to_string()))?;

        if metadata.status.as_deref() == Some(STATUS_REQUEST_DENIED) {
            return Err(FetchError::Denied(format!(
                "metadata lookup for {coordinate} was refused; check the API key"
            )));
        }

        debug!(
            "metadata for {coordinate}: pano_id={:?} date={:?}",
            metadata.pano_id, metadata.date
        );
        Ok(metadata)
    }

    async fn image(
        &self,
        target: &ImageTarget,
        heading: Heading,
        options: &FetchOptions,
        api_key: &str,
    ) -> Result<Bytes, FetchError> {
        let mut request = self.client.get(IMAGE_ENDPOINT).query(&[
            ("size", format!("{}x{}", options.width, options.height)),
            ("fov", options.fov.to_string()),
            ("heading", heading.degrees().to_string()),
            ("pitch", options.pitch.to_string()),
            ("key", api_key.into()),
        ]);
        request = match target {
            ImageTarget::Panorama(id) => request.query(&[("pano", id)]),
            ImageTarget::Location(coordinate) => {
                request.query(&[("location", &coordinate.to_string())])
            }
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.bytes().await?)
    }
}
