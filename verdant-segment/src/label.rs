use anyhow::bail;
use std::fmt;
use std::str::FromStr;

/// The fixed vocabulary a street-scene segmentation model emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticLabel {
    Road,
    Sidewalk,
    Building,
    Wall,
    Pole,
    TrafficSign,
    Vegetation,
    Terrain,
    Sky,
    Car,
    Person,
}

impl SemanticLabel {
    pub const ALL: [SemanticLabel; 11] = [
        SemanticLabel::Road,
        SemanticLabel::Sidewalk,
        SemanticLabel::Building,
        SemanticLabel::Wall,
        SemanticLabel::Pole,
        SemanticLabel::TrafficSign,
        SemanticLabel::Vegetation,
        SemanticLabel::Terrain,
        SemanticLabel::Sky,
        SemanticLabel::Car,
        SemanticLabel::Person,
    ];

    /// The model-side name, as the provider spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            SemanticLabel::Road => "road",
            SemanticLabel::Sidewalk => "sidewalk",
            SemanticLabel::Building => "building",
            SemanticLabel::Wall => "wall",
            SemanticLabel::Pole => "pole",
            SemanticLabel::TrafficSign => "traffic sign",
            SemanticLabel::Vegetation => "vegetation",
            SemanticLabel::Terrain => "terrain",
            SemanticLabel::Sky => "sky",
            SemanticLabel::Car => "car",
            SemanticLabel::Person => "person",
        }
    }
}

impl fmt::Display for SemanticLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticLabel {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        for label in SemanticLabel::ALL {
            if label.as_str() == raw {
                return Ok(label);
            }
        }
        bail!("unknown segmentation label: {raw:?}")
    }
}
