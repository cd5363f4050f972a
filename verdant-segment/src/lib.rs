pub mod label;
pub mod mask;
pub mod scorer;

pub use label::SemanticLabel;
pub use mask::{SegmentationMask, SegmentationRegion};
pub use scorer::{Coverage, FailureCause, SegmentInference, SegmentationScorer};
