use ndarray::Array2;
use tempfile::tempdir;

use crate::model::PixelType;

use super::{read_plane, supported_plane_formats, write_volume_tiff};

fn gradient_plane(height: usize, width: usize) -> Array2<f32> {
    Array2::from_shape_fn((height, width), |(y, x)| {
        (y * width + x) as f32 / (height * width) as f32
    })
}

#[test]
fn tiff_plane_roundtrip_f32() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("plane.tif");
    let plane = gradient_plane(5, 4);
    write_volume_tiff(&path, PixelType::F32, std::slice::from_ref(&plane)).expect("write");
    let (restored, pixel_type) = read_plane(&path).expect("read");
    assert_eq!(pixel_type, PixelType::F32);
    assert_eq!(restored, plane);
}

#[test]
fn tiff_volume_write_rejects_mismatched_pages() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("volume.tif");
    let pages = vec![gradient_plane(4, 4), gradient_plane(3, 4)];
    assert!(write_volume_tiff(&path, PixelType::F32, &pages).is_err());
}

#[test]
fn multi_page_tiff_is_not_a_plane() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("stack.tif");
    let pages = vec![gradient_plane(4, 4), gradient_plane(4, 4)];
    write_volume_tiff(&path, PixelType::U16, &pages).expect("write");
    assert!(read_plane(&path).is_err());
}

#[test]
fn png_plane_reads_as_gray() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("plane.png");
    let buffer = image::GrayImage::from_fn(6, 3, |x, y| image::Luma([(x + y) as u8 * 10]));
    buffer.save(&path).expect("save png");
    let (plane, pixel_type) = read_plane(&path).expect("read");
    assert_eq!(pixel_type, PixelType::U8);
    assert_eq!(plane.dim(), (3, 6));
    assert!((plane[(0, 1)] - 10.0 / 255.0).abs() < 1e-6);
}

#[test]
fn unknown_extension_is_rejected() {
    assert!(read_plane("plane.bin").is_err());
    assert!(!supported_plane_formats().contains(&"bin"));
}
