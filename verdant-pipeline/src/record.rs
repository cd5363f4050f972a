use verdant_imagery::{CaptureMetadata, Coordinate, Heading};
use verdant_segment::Coverage;

/// One scored (coordinate, heading) pair. The pipeline emits exactly one
/// record per requested pair, whatever failed along the way; failures
/// degrade `coverage`, never the record count.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub coordinate: Coordinate,
    pub heading: Heading,
    /// `None` only when the metadata lookup itself failed.
    pub metadata: Option<CaptureMetadata>,
    pub coverage: Coverage,
}
