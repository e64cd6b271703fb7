use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::{Dimension, PixelType};

pub type ImageId = i64;
pub type DatasetId = i64;

/// An existing stored image, possibly already containing multiple planes
/// along Z, C or T.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceImage {
    pub id: ImageId,
    pub name: String,
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
    pub size_c: usize,
    pub size_t: usize,
    pub pixel_type: PixelType,
    /// Labels of the image's own channels, used when the source is already
    /// multi-channel and no override is supplied.
    #[serde(default)]
    pub channel_labels: Vec<String>,
}

impl SourceImage {
    pub fn single_plane(id: ImageId, name: impl Into<String>, size_x: usize, size_y: usize) -> Self {
        Self {
            id,
            name: name.into(),
            size_x,
            size_y,
            size_z: 1,
            size_c: 1,
            size_t: 1,
            pixel_type: PixelType::F32,
            channel_labels: Vec::new(),
        }
    }

    pub fn native_size(&self, dimension: Dimension) -> usize {
        match dimension {
            Dimension::Z => self.size_z,
            Dimension::Channel => self.size_c,
            Dimension::Time => self.size_t,
        }
    }

    /// A dimension is multiplexed when the image itself already contains more
    /// than one plane along it.
    pub fn is_multiplexed(&self, dimension: Dimension) -> bool {
        self.native_size(dimension) > 1
    }
}

/// Physical pixel size along one axis. Compared exactly; two observations
/// agree only when both value and unit match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub value: f64,
    pub unit: String,
}

impl PhysicalSize {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    pub fn micrometers(value: f64) -> Self {
        Self::new(value, "µm")
    }
}

/// A fetched 2D plane with its calibration, as returned by a source store.
#[derive(Debug, Clone)]
pub struct PlaneData {
    pub pixels: Array2<f32>,
    pub physical_size_x: Option<PhysicalSize>,
    pub physical_size_y: Option<PhysicalSize>,
}

impl PlaneData {
    pub fn uncalibrated(pixels: Array2<f32>) -> Self {
        Self {
            pixels,
            physical_size_x: None,
            physical_size_y: None,
        }
    }
}
