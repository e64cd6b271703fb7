use serde::{Deserialize, Serialize};

use crate::assign::Collision;
use crate::model::{ImageId, PhysicalSize, Rgba};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelReport {
    pub label: String,
    pub min: f32,
    pub max: f32,
    pub colour: Rgba,
}

/// Machine-readable summary of one finished assembly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombineReport {
    pub output_image: ImageId,
    pub name: String,
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
    pub size_c: usize,
    pub size_t: usize,
    pub source_count: usize,
    pub fetched_planes: usize,
    pub synthesized_planes: usize,
    pub channels: Vec<ChannelReport>,
    pub pixel_size_x: Option<PhysicalSize>,
    pub pixel_size_y: Option<PhysicalSize>,
    pub collisions: Vec<Collision>,
}

/// One entry per derived group; `report` is `None` when the group's
/// selection turned out empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupReport {
    pub group: String,
    pub report: Option<CombineReport>,
}
