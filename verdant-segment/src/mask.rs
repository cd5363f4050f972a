use crate::label::SemanticLabel;
use anyhow::{ensure, Result};
use bitvec::vec::BitVec;

/// Boolean pixel grid aligned to the source image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationMask {
    bits: BitVec,
    width: u32,
    height: u32,
}

impl SegmentationMask {
    pub fn new(bits: BitVec, width: u32, height: u32) -> Result<Self> {
        ensure!(
            bits.len() == (width as usize) * (height as usize),
            "mask length {} does not match {width}x{height}",
            bits.len()
        );
        Ok(SegmentationMask {
            bits,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bits(&self) -> &BitVec {
        &self.bits
    }

    /// Share of set pixels as a percentage in [0, 100]. A zero-size mask
    /// has no defined coverage and yields `None`.
    pub fn coverage_percent(&self) -> Option<f32> {
        if self.bits.is_empty() {
            return None;
        }
        Some(self.bits.count_ones() as f32 * 100.0 / self.bits.len() as f32)
    }
}

/// One labelled region reported by the segmentation capability.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationRegion {
    pub label: SemanticLabel,
    pub mask: SegmentationMask,
}
