use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::assign::VolumeLayout;
use crate::model::{ImageId, PhysicalSize, PlaneCoord, Rgba};
use crate::store::{OutputSink, SourceStore};

use super::pixel_size::reconcile_pixel_size;
use super::{AssembleError, Result};

/// True min/max over all planes of one channel, including the 0 contributed
/// by any synthesized zero plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyStats {
    pub channel_ranges: Vec<ChannelRange>,
    pub pixel_size_x: Option<PhysicalSize>,
    pub pixel_size_y: Option<PhysicalSize>,
    pub fetched_planes: usize,
    pub synthesized_planes: usize,
}

/// Walks the destination coordinate space in fixed order (channel outer,
/// then z, then t) and writes exactly one plane per coordinate to the sink.
/// Coordinates absent from the layout are zero-filled at the output's X×Y
/// shape. The loop is strictly sequential: the sink is a non-reentrant
/// session and writes must never be reordered.
pub fn assemble_volume<S, K>(
    layout: &VolumeLayout,
    source: &S,
    sink: &mut K,
    output: ImageId,
    colours: &[Rgba],
) -> Result<AssemblyStats>
where
    S: SourceStore + ?Sized,
    K: OutputSink + ?Sized,
{
    let mut channel_ranges = Vec::with_capacity(layout.size_c);
    let mut size_x_observations: Vec<Option<PhysicalSize>> = Vec::new();
    let mut size_y_observations: Vec<Option<PhysicalSize>> = Vec::new();
    let mut fetched_planes = 0;
    let mut synthesized_planes = 0;

    for c in 0..layout.size_c {
        let mut range: Option<ChannelRange> = None;
        for z in 0..layout.size_z {
            for t in 0..layout.size_t {
                let coord = PlaneCoord::new(z, c, t);
                let plane = match layout.locate(coord) {
                    Some(locator) => {
                        let data = source
                            .fetch_plane(locator.image, locator.z, locator.c, locator.t)
                            .map_err(|source| AssembleError::Fetch { coord, source })?;
                        let (actual_y, actual_x) = data.pixels.dim();
                        if (actual_y, actual_x) != (layout.size_y, layout.size_x) {
                            return Err(AssembleError::PlaneShapeMismatch {
                                image: locator.image,
                                coord,
                                expected_y: layout.size_y,
                                expected_x: layout.size_x,
                                actual_y,
                                actual_x,
                            });
                        }
                        size_x_observations.push(data.physical_size_x);
                        size_y_observations.push(data.physical_size_y);
                        fetched_planes += 1;
                        data.pixels
                    }
                    None => {
                        synthesized_planes += 1;
                        Array2::zeros((layout.size_y, layout.size_x))
                    }
                };
                sink.upload_plane(output, coord, &plane)?;
                range = Some(accumulate_range(range, &plane));
            }
        }
        let range = range.unwrap_or(ChannelRange { min: 0.0, max: 0.0 });
        let colour = colours.get(c).copied().unwrap_or(Rgba::WHITE);
        sink.set_channel_display_range(output, c, range.min, range.max, colour)?;
        channel_ranges.push(range);
    }

    Ok(AssemblyStats {
        channel_ranges,
        pixel_size_x: reconcile_pixel_size(&size_x_observations),
        pixel_size_y: reconcile_pixel_size(&size_y_observations),
        fetched_planes,
        synthesized_planes,
    })
}

fn accumulate_range(range: Option<ChannelRange>, plane: &Array2<f32>) -> ChannelRange {
    let mut range = range.unwrap_or(ChannelRange {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    });
    for value in plane.iter() {
        range.min = range.min.min(*value);
        range.max = range.max.max(*value);
    }
    range
}
