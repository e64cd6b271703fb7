use std::path::Path;

use image::DynamicImage;
use ndarray::Array2;

use crate::model::PixelType;

use super::Result;

/// Source planes are single-sample; colour rasters are collapsed to
/// luminance on read.
pub(crate) fn read_gray_plane(path: &Path) -> Result<(Array2<f32>, PixelType)> {
    let image = image::open(path)?;
    match image {
        DynamicImage::ImageLuma8(buffer) => {
            let (width, height) = buffer.dimensions();
            let values = buffer
                .pixels()
                .map(|pixel| f32::from(pixel.0[0]) / 255.0)
                .collect::<Vec<_>>();
            let plane = Array2::from_shape_vec((height as usize, width as usize), values)
                .expect("shape checked");
            Ok((plane, PixelType::U8))
        }
        DynamicImage::ImageLuma16(buffer) => {
            let (width, height) = buffer.dimensions();
            let values = buffer
                .pixels()
                .map(|pixel| f32::from(pixel.0[0]) / 65_535.0)
                .collect::<Vec<_>>();
            let plane = Array2::from_shape_vec((height as usize, width as usize), values)
                .expect("shape checked");
            Ok((plane, PixelType::U16))
        }
        other => {
            let gray = other.to_luma8();
            let (width, height) = gray.dimensions();
            let values = gray
                .pixels()
                .map(|pixel| f32::from(pixel.0[0]) / 255.0)
                .collect::<Vec<_>>();
            let plane = Array2::from_shape_vec((height as usize, width as usize), values)
                .expect("shape checked");
            Ok((plane, PixelType::U8))
        }
    }
}
