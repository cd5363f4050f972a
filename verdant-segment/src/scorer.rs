use crate::label::SemanticLabel;
use crate::mask::SegmentationRegion;
use anyhow::Result;
use image::DynamicImage;
use log::{debug, warn};

/// The segmentation capability behind the scorer. One session owns the
/// model weights and is driven by one caller at a time; spin up one
/// session per worker for independent batches.
pub trait SegmentInference {
    fn segment(&mut self, image: &DynamicImage) -> Result<Vec<SegmentationRegion>>;
}

/// Outcome of scoring one image for one label. Label-absent is a real
/// measurement of zero, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Coverage {
    /// Percentage of pixels carrying the label, in [0, 100].
    Measured(f32),
    Unavailable(FailureCause),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The metadata lookup for the whole coordinate failed.
    Fetch(String),
    /// The provider had no decodable image for this sample.
    MissingImage,
    /// The model could not process the image, or returned a malformed mask.
    Segmentation,
}

/// Reduces per-image segmentation output to a per-label coverage
/// percentage. The session is taken once so its load cost is amortized
/// over the whole batch.
pub struct SegmentationScorer<S> {
    session: S,
}

impl<S: SegmentInference> SegmentationScorer<S> {
    pub fn new(session: S) -> Self {
        SegmentationScorer { session }
    }

    /// Scores a batch, one `Coverage` per input image in input order.
    /// Absent images short-circuit without touching the model.
    pub fn score<'a, I>(&mut self, images: I, label: SemanticLabel) -> Vec<Coverage>
    where
        I: IntoIterator<Item = Option<&'a DynamicImage>>,
    {
        images
            .into_iter()
            .map(|image| self.score_one(image, label))
            .collect()
    }

    fn score_one(&mut self, image: Option<&DynamicImage>, label: SemanticLabel) -> Coverage {
        let Some(image) = image else {
            return Coverage::Unavailable(FailureCause::MissingImage);
        };

        let regions = match self.session.segment(image) {
            Ok(regions) => regions,
            Err(err) => {
                warn!("segmentation failed: {err:#}");
                return Coverage::Unavailable(FailureCause::Segmentation);
            }
        };

        let Some(region) = regions.into_iter().find(|region| region.label == label) else {
            debug!("no {label} region found");
            return Coverage::Measured(0.0);
        };

        match region.mask.coverage_percent() {
            Some(percent) => Coverage::Measured(percent),
            None => {
                warn!("model returned a zero-size mask for {label}");
                Coverage::Unavailable(FailureCause::Segmentation)
            }
        }
    }
}
