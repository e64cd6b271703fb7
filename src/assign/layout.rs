use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ImageId, PixelType, PlaneCoord, SourceLocator};

/// Two source images resolved to the same destination coordinate. The later
/// one (in sort order) wins; the condition is surfaced so callers can warn
/// or reject instead of silently losing a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub coord: PlaneCoord,
    pub replaced: ImageId,
    pub kept: ImageId,
}

/// Output shape, channel table and destination→source map produced by the
/// index assigner. Built once per assembly and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeLayout {
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
    pub size_c: usize,
    pub size_t: usize,
    pub pixel_type: PixelType,
    /// Channel display names in first-seen token order.
    pub channels: Vec<String>,
    pub planes: BTreeMap<PlaneCoord, SourceLocator>,
    pub collisions: Vec<Collision>,
}

impl VolumeLayout {
    pub fn locate(&self, coord: PlaneCoord) -> Option<SourceLocator> {
        self.planes.get(&coord).copied()
    }

    pub fn plane_count(&self) -> usize {
        self.size_z * self.size_c * self.size_t
    }

    /// Destination coordinates with no contributing source plane; these are
    /// zero-filled at assembly time.
    pub fn missing_coords(&self) -> Vec<PlaneCoord> {
        let mut missing = Vec::new();
        for c in 0..self.size_c {
            for z in 0..self.size_z {
                for t in 0..self.size_t {
                    let coord = PlaneCoord::new(z, c, t);
                    if !self.planes.contains_key(&coord) {
                        missing.push(coord);
                    }
                }
            }
        }
        missing
    }
}
