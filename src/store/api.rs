use ndarray::Array2;

use crate::model::{
    DatasetId, ImageId, PhysicalSize, PixelType, PlaneCoord, PlaneData, Rgba, SourceImage,
};

use super::Result;

/// Extents and identity of a new output image.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputImageSpec {
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
    pub size_c: usize,
    pub size_t: usize,
    pub pixel_type: PixelType,
    pub name: String,
    pub description: String,
}

/// Read side of the external image store. Listing and fetching are read-only
/// so independent assemblies can share one store.
pub trait SourceStore {
    /// Source images of one dataset, sorted case-insensitively by name.
    fn list_source_images(&self, dataset: DatasetId) -> Result<Vec<SourceImage>>;

    /// One 2D plane of a source image. Missing images or planes are fatal to
    /// the enclosing assembly.
    fn fetch_plane(&self, image: ImageId, z: usize, c: usize, t: usize) -> Result<PlaneData>;
}

/// Write side of the external image store. A stateful, non-reentrant session:
/// one output buffer open at a time, every destination coordinate written
/// exactly once, in the assembly engine's fixed order.
pub trait OutputSink {
    fn create_output_image(&mut self, spec: &OutputImageSpec) -> Result<ImageId>;

    fn upload_plane(
        &mut self,
        output: ImageId,
        coord: PlaneCoord,
        plane: &Array2<f32>,
    ) -> Result<()>;

    fn set_channel_display_range(
        &mut self,
        output: ImageId,
        channel: usize,
        min: f32,
        max: f32,
        colour: Rgba,
    ) -> Result<()>;

    fn rename_channel(&mut self, output: ImageId, channel: usize, label: &str) -> Result<()>;

    fn set_pixel_physical_size(
        &mut self,
        output: ImageId,
        x: Option<&PhysicalSize>,
        y: Option<&PhysicalSize>,
    ) -> Result<()>;

    fn link_to_dataset(&mut self, output: ImageId, dataset: DatasetId) -> Result<()>;
}
