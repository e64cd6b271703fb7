use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::assign::name_sort_key;
use crate::formats::{read_plane, supported_plane_formats, write_volume_tiff};
use crate::model::{
    DatasetId, ImageId, PhysicalSize, PlaneCoord, PlaneData, Rgba, SourceImage,
};

use super::{OutputImageSpec, OutputSink, Result, SourceStore, StoreError};

/// A directory of single-plane image files treated as one dataset: the file
/// stem is the plane name, ids follow the case-insensitive name sort. The
/// dataset id argument is ignored; the directory is the only dataset. Each
/// file is decoded once at open time and served from memory after that.
#[derive(Debug)]
pub struct DirSource {
    images: Vec<SourceImage>,
    planes: BTreeMap<ImageId, Array2<f32>>,
}

impl DirSource {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let mut files: Vec<PathBuf> = fs::read_dir(root)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| {
                        supported_plane_formats().contains(&ext.to_ascii_lowercase().as_str())
                    })
                    .unwrap_or(false)
            })
            .collect();
        files.sort_by_key(|path| name_sort_key(&file_stem(path)));

        let mut images = Vec::with_capacity(files.len());
        let mut planes = BTreeMap::new();
        for (index, path) in files.into_iter().enumerate() {
            let id = index as ImageId + 1;
            let (pixels, pixel_type) = read_plane(&path)?;
            let (size_y, size_x) = pixels.dim();
            let mut image = SourceImage::single_plane(id, file_stem(&path), size_x, size_y);
            image.pixel_type = pixel_type;
            images.push(image);
            planes.insert(id, pixels);
        }
        Ok(Self { images, planes })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

impl SourceStore for DirSource {
    fn list_source_images(&self, _dataset: DatasetId) -> Result<Vec<SourceImage>> {
        Ok(self.images.clone())
    }

    fn fetch_plane(&self, image: ImageId, z: usize, c: usize, t: usize) -> Result<PlaneData> {
        if z != 0 || c != 0 || t != 0 {
            return Err(StoreError::PlaneNotFound { image, z, c, t });
        }
        let pixels = self
            .planes
            .get(&image)
            .cloned()
            .ok_or(StoreError::ImageNotFound(image))?;
        Ok(PlaneData::uncalibrated(pixels))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidecarChannel {
    pub label: Option<String>,
    pub min: f32,
    pub max: f32,
    pub colour: Rgba,
}

/// Display metadata written next to the assembled TIFF, carrying what the
/// TIFF container itself cannot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeSidecar {
    pub name: String,
    pub description: String,
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
    pub size_c: usize,
    pub size_t: usize,
    pub channels: Vec<SidecarChannel>,
    pub pixel_size_x: Option<PhysicalSize>,
    pub pixel_size_y: Option<PhysicalSize>,
}

#[derive(Debug)]
struct PendingVolume {
    spec: OutputImageSpec,
    pages: BTreeMap<PlaneCoord, Array2<f32>>,
    upload_order: Vec<PlaneCoord>,
    channels: Vec<SidecarChannel>,
    pixel_size_x: Option<PhysicalSize>,
    pixel_size_y: Option<PhysicalSize>,
}

/// Output sink that accumulates one volume in memory and materializes it as
/// a multi-page grayscale TIFF (pages in upload order) plus a JSON sidecar.
#[derive(Debug)]
pub struct TiffSink {
    root: PathBuf,
    pending: BTreeMap<ImageId, PendingVolume>,
    next_id: ImageId,
}

impl TiffSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pending: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Writes the finished volume to disk and returns the TIFF path.
    pub fn finish(&mut self, output: ImageId) -> Result<PathBuf> {
        let volume = self
            .pending
            .remove(&output)
            .ok_or(StoreError::OutputNotFound(output))?;
        fs::create_dir_all(&self.root)?;
        let tiff_path = self.root.join(format!("{}.tif", volume.spec.name));
        let pages: Vec<Array2<f32>> = volume
            .upload_order
            .iter()
            .filter_map(|coord| volume.pages.get(coord).cloned())
            .collect();
        let expected = volume.spec.size_z * volume.spec.size_c * volume.spec.size_t;
        if pages.len() != expected {
            return Err(StoreError::IncompleteVolume {
                output,
                expected,
                actual: pages.len(),
            });
        }
        write_volume_tiff(&tiff_path, volume.spec.pixel_type, &pages)?;

        let sidecar = VolumeSidecar {
            name: volume.spec.name.clone(),
            description: volume.spec.description.clone(),
            size_x: volume.spec.size_x,
            size_y: volume.spec.size_y,
            size_z: volume.spec.size_z,
            size_c: volume.spec.size_c,
            size_t: volume.spec.size_t,
            channels: volume.channels,
            pixel_size_x: volume.pixel_size_x,
            pixel_size_y: volume.pixel_size_y,
        };
        let sidecar_path = self.root.join(format!("{}.json", volume.spec.name));
        let serialized = serde_json::to_string_pretty(&sidecar)
            .map_err(|error| std::io::Error::other(error.to_string()))?;
        fs::write(sidecar_path, serialized)?;
        Ok(tiff_path)
    }

    fn volume_mut(&mut self, output: ImageId) -> Result<&mut PendingVolume> {
        self.pending
            .get_mut(&output)
            .ok_or(StoreError::OutputNotFound(output))
    }
}

impl OutputSink for TiffSink {
    fn create_output_image(&mut self, spec: &OutputImageSpec) -> Result<ImageId> {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert(
            id,
            PendingVolume {
                spec: spec.clone(),
                pages: BTreeMap::new(),
                upload_order: Vec::new(),
                channels: vec![
                    SidecarChannel {
                        label: None,
                        min: 0.0,
                        max: 0.0,
                        colour: Rgba::WHITE,
                    };
                    spec.size_c
                ],
                pixel_size_x: None,
                pixel_size_y: None,
            },
        );
        Ok(id)
    }

    fn upload_plane(
        &mut self,
        output: ImageId,
        coord: PlaneCoord,
        plane: &Array2<f32>,
    ) -> Result<()> {
        let volume = self.volume_mut(output)?;
        if volume.pages.contains_key(&coord) {
            return Err(StoreError::DuplicateUpload { output, coord });
        }
        volume.pages.insert(coord, plane.clone());
        volume.upload_order.push(coord);
        Ok(())
    }

    fn set_channel_display_range(
        &mut self,
        output: ImageId,
        channel: usize,
        min: f32,
        max: f32,
        colour: Rgba,
    ) -> Result<()> {
        let volume = self.volume_mut(output)?;
        let slot = volume
            .channels
            .get_mut(channel)
            .ok_or(StoreError::UnknownChannel { output, channel })?;
        slot.min = min;
        slot.max = max;
        slot.colour = colour;
        Ok(())
    }

    fn rename_channel(&mut self, output: ImageId, channel: usize, label: &str) -> Result<()> {
        let volume = self.volume_mut(output)?;
        let slot = volume
            .channels
            .get_mut(channel)
            .ok_or(StoreError::UnknownChannel { output, channel })?;
        slot.label = Some(label.to_string());
        Ok(())
    }

    fn set_pixel_physical_size(
        &mut self,
        output: ImageId,
        x: Option<&PhysicalSize>,
        y: Option<&PhysicalSize>,
    ) -> Result<()> {
        let volume = self.volume_mut(output)?;
        volume.pixel_size_x = x.cloned();
        volume.pixel_size_y = y.cloned();
        Ok(())
    }

    fn link_to_dataset(&mut self, _output: ImageId, _dataset: DatasetId) -> Result<()> {
        // Filesystem outputs have no dataset graph to link into.
        Ok(())
    }
}
