use std::path::Path;

use ndarray::Array2;

use crate::model::PixelType;

use super::raster::read_gray_plane;
use super::tiff::{read_plane_tiff, write_pages_tiff};
use super::util::extension;
use super::{IoError, Result};

/// Decodes one single-plane image file into a grayscale f32 buffer, shape
/// `(height, width)`, together with the native sample type.
pub fn read_plane(path: impl AsRef<Path>) -> Result<(Array2<f32>, PixelType)> {
    let path = path.as_ref();
    let extension = extension(path)?;
    match extension.as_str() {
        "png" | "jpg" | "jpeg" => read_gray_plane(path),
        "tif" | "tiff" => read_plane_tiff(path),
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}

/// Encodes an assembled volume as a multi-page grayscale TIFF, one page per
/// plane, in the order given.
pub fn write_volume_tiff(
    path: impl AsRef<Path>,
    pixel_type: PixelType,
    pages: &[Array2<f32>],
) -> Result<()> {
    write_pages_tiff(path.as_ref(), pixel_type, pages)
}

pub fn supported_plane_formats() -> &'static [&'static str] {
    &["png", "jpg", "jpeg", "tif", "tiff"]
}
