use serde::{Deserialize, Serialize};

use super::ImageId;

/// Zero-based destination position in the output volume, canonical after
/// offset normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlaneCoord {
    pub z: usize,
    pub c: usize,
    pub t: usize,
}

impl PlaneCoord {
    pub fn new(z: usize, c: usize, t: usize) -> Self {
        Self { z, c, t }
    }
}

impl std::fmt::Display for PlaneCoord {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "(z={}, c={}, t={})", self.z, self.c, self.t)
    }
}

/// Where a requested plane physically lives inside a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocator {
    pub image: ImageId,
    pub z: usize,
    pub c: usize,
    pub t: usize,
}

impl SourceLocator {
    pub fn new(image: ImageId, z: usize, c: usize, t: usize) -> Self {
        Self { image, z, c, t }
    }
}
