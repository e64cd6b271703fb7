use std::collections::BTreeMap;

use ndarray::Array2;

use crate::assign::name_sort_key;
use crate::model::{
    DatasetId, ImageId, PhysicalSize, PlaneCoord, PlaneData, Rgba, SourceImage,
};

use super::{OutputImageSpec, OutputSink, Result, SourceStore, StoreError};

#[derive(Debug, Clone)]
struct StoredSource {
    info: SourceImage,
    planes: BTreeMap<(usize, usize, usize), Array2<f32>>,
    physical_size_x: Option<PhysicalSize>,
    physical_size_y: Option<PhysicalSize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSettings {
    pub range: (f32, f32),
    pub colour: Rgba,
}

/// Everything the sink half has been told about one created output image.
/// Upload order is recorded verbatim so tests can assert the write contract.
#[derive(Debug, Clone)]
pub struct OutputRecord {
    pub spec: OutputImageSpec,
    pub planes: BTreeMap<PlaneCoord, Array2<f32>>,
    pub upload_order: Vec<PlaneCoord>,
    pub channel_settings: Vec<Option<ChannelSettings>>,
    pub channel_labels: Vec<Option<String>>,
    pub physical_size_x: Option<PhysicalSize>,
    pub physical_size_y: Option<PhysicalSize>,
    pub linked_datasets: Vec<DatasetId>,
}

/// In-memory source collection and output sink. Backs the test suite and
/// embedders that stage planes before talking to a real store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    datasets: BTreeMap<DatasetId, Vec<ImageId>>,
    sources: BTreeMap<ImageId, StoredSource>,
    outputs: BTreeMap<ImageId, OutputRecord>,
    next_output_id: ImageId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_output_id: 1_000,
            ..Self::default()
        }
    }

    pub fn add_source_image(&mut self, dataset: DatasetId, info: SourceImage) {
        self.datasets.entry(dataset).or_default().push(info.id);
        self.sources.insert(
            info.id,
            StoredSource {
                info,
                planes: BTreeMap::new(),
                physical_size_x: None,
                physical_size_y: None,
            },
        );
    }

    /// Seeds a single-plane source image filled with `value` and returns its id.
    pub fn add_uniform_plane(
        &mut self,
        dataset: DatasetId,
        id: ImageId,
        name: &str,
        size_x: usize,
        size_y: usize,
        value: f32,
    ) {
        self.add_source_image(dataset, SourceImage::single_plane(id, name, size_x, size_y));
        self.set_plane(id, (0, 0, 0), Array2::from_elem((size_y, size_x), value));
    }

    pub fn set_plane(&mut self, image: ImageId, (z, c, t): (usize, usize, usize), plane: Array2<f32>) {
        if let Some(source) = self.sources.get_mut(&image) {
            source.planes.insert((z, c, t), plane);
        }
    }

    pub fn set_physical_sizes(
        &mut self,
        image: ImageId,
        x: Option<PhysicalSize>,
        y: Option<PhysicalSize>,
    ) {
        if let Some(source) = self.sources.get_mut(&image) {
            source.physical_size_x = x;
            source.physical_size_y = y;
        }
    }

    pub fn output(&self, id: ImageId) -> Option<&OutputRecord> {
        self.outputs.get(&id)
    }

    pub fn output_ids(&self) -> Vec<ImageId> {
        self.outputs.keys().copied().collect()
    }
}

/// Destination coordinate of the `index`-th upload in the channel-outer,
/// z-then-t-inner write order.
fn expected_coord(spec: &OutputImageSpec, index: usize) -> PlaneCoord {
    let per_channel = spec.size_z * spec.size_t;
    PlaneCoord::new(
        index % per_channel / spec.size_t,
        index / per_channel,
        index % spec.size_t,
    )
}

impl SourceStore for MemoryStore {
    fn list_source_images(&self, dataset: DatasetId) -> Result<Vec<SourceImage>> {
        let ids = self.datasets.get(&dataset).cloned().unwrap_or_default();
        let mut images = ids
            .iter()
            .map(|id| {
                self.sources
                    .get(id)
                    .map(|source| source.info.clone())
                    .ok_or(StoreError::ImageNotFound(*id))
            })
            .collect::<Result<Vec<_>>>()?;
        images.sort_by_key(|image| name_sort_key(&image.name));
        Ok(images)
    }

    fn fetch_plane(&self, image: ImageId, z: usize, c: usize, t: usize) -> Result<PlaneData> {
        let source = self
            .sources
            .get(&image)
            .ok_or(StoreError::ImageNotFound(image))?;
        let pixels = source
            .planes
            .get(&(z, c, t))
            .cloned()
            .ok_or(StoreError::PlaneNotFound { image, z, c, t })?;
        Ok(PlaneData {
            pixels,
            physical_size_x: source.physical_size_x.clone(),
            physical_size_y: source.physical_size_y.clone(),
        })
    }
}

impl OutputSink for MemoryStore {
    fn create_output_image(&mut self, spec: &OutputImageSpec) -> Result<ImageId> {
        let id = self.next_output_id;
        self.next_output_id += 1;
        self.outputs.insert(
            id,
            OutputRecord {
                spec: spec.clone(),
                planes: BTreeMap::new(),
                upload_order: Vec::new(),
                channel_settings: vec![None; spec.size_c],
                channel_labels: vec![None; spec.size_c],
                physical_size_x: None,
                physical_size_y: None,
                linked_datasets: Vec::new(),
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
        let record = self
            .outputs
            .get_mut(&output)
            .ok_or(StoreError::OutputNotFound(output))?;
        let spec = &record.spec;
        if coord.z >= spec.size_z || coord.c >= spec.size_c || coord.t >= spec.size_t {
            return Err(StoreError::UploadOutOfBounds { output, coord });
        }
        let (actual_y, actual_x) = plane.dim();
        if (actual_y, actual_x) != (spec.size_y, spec.size_x) {
            return Err(StoreError::UploadShapeMismatch {
                output,
                expected_y: spec.size_y,
                expected_x: spec.size_x,
                actual_y,
                actual_x,
            });
        }
        if record.planes.contains_key(&coord) {
            return Err(StoreError::DuplicateUpload { output, coord });
        }
        let expected = expected_coord(spec, record.upload_order.len());
        if coord != expected {
            return Err(StoreError::UploadOutOfOrder {
                output,
                expected,
                actual: coord,
            });
        }
        record.planes.insert(coord, plane.clone());
        record.upload_order.push(coord);
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
        let record = self
            .outputs
            .get_mut(&output)
            .ok_or(StoreError::OutputNotFound(output))?;
        let slot = record
            .channel_settings
            .get_mut(channel)
            .ok_or(StoreError::UnknownChannel { output, channel })?;
        *slot = Some(ChannelSettings {
            range: (min, max),
            colour,
        });
        Ok(())
    }

    fn rename_channel(&mut self, output: ImageId, channel: usize, label: &str) -> Result<()> {
        let record = self
            .outputs
            .get_mut(&output)
            .ok_or(StoreError::OutputNotFound(output))?;
        let slot = record
            .channel_labels
            .get_mut(channel)
            .ok_or(StoreError::UnknownChannel { output, channel })?;
        *slot = Some(label.to_string());
        Ok(())
    }

    fn set_pixel_physical_size(
        &mut self,
        output: ImageId,
        x: Option<&PhysicalSize>,
        y: Option<&PhysicalSize>,
    ) -> Result<()> {
        let record = self
            .outputs
            .get_mut(&output)
            .ok_or(StoreError::OutputNotFound(output))?;
        record.physical_size_x = x.cloned();
        record.physical_size_y = y.cloned();
        Ok(())
    }

    fn link_to_dataset(&mut self, output: ImageId, dataset: DatasetId) -> Result<()> {
        let record = self
            .outputs
            .get_mut(&output)
            .ok_or(StoreError::OutputNotFound(output))?;
        record.linked_datasets.push(dataset);
        Ok(())
    }
}
