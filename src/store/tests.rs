use ndarray::Array2;
use tempfile::tempdir;

use crate::formats::write_volume_tiff;
use crate::model::{PixelType, PlaneCoord, SourceImage};

use super::{
    DirSource, MemoryStore, OutputImageSpec, OutputSink, SourceStore, StoreError, TiffSink,
    VolumeSidecar,
};

fn spec() -> OutputImageSpec {
    OutputImageSpec {
        size_x: 2,
        size_y: 2,
        size_z: 1,
        size_c: 1,
        size_t: 2,
        pixel_type: PixelType::F32,
        name: "combinedImage".into(),
        description: "test".into(),
    }
}

#[test]
fn memory_listing_sorts_names_case_insensitively() {
    let mut store = MemoryStore::new();
    store.add_source_image(1, SourceImage::single_plane(10, "B_plane", 2, 2));
    store.add_source_image(1, SourceImage::single_plane(11, "a_plane", 2, 2));
    let images = store.list_source_images(1).expect("list");
    let names: Vec<&str> = images.iter().map(|image| image.name.as_str()).collect();
    assert_eq!(names, vec!["a_plane", "B_plane"]);
}

#[test]
fn memory_fetch_of_missing_plane_fails() {
    let mut store = MemoryStore::new();
    store.add_source_image(1, SourceImage::single_plane(10, "p", 2, 2));
    assert!(matches!(
        store.fetch_plane(10, 0, 0, 0),
        Err(StoreError::PlaneNotFound { .. })
    ));
    assert!(matches!(
        store.fetch_plane(99, 0, 0, 0),
        Err(StoreError::ImageNotFound(99))
    ));
}

#[test]
fn memory_sink_rejects_duplicate_and_out_of_bounds_uploads() {
    let mut store = MemoryStore::new();
    let output = store.create_output_image(&spec()).expect("create");
    let plane = Array2::zeros((2, 2));
    store
        .upload_plane(output, PlaneCoord::new(0, 0, 0), &plane)
        .expect("first upload");
    assert!(matches!(
        store.upload_plane(output, PlaneCoord::new(0, 0, 0), &plane),
        Err(StoreError::DuplicateUpload { .. })
    ));
    assert!(matches!(
        store.upload_plane(output, PlaneCoord::new(5, 0, 0), &plane),
        Err(StoreError::UploadOutOfBounds { .. })
    ));
    assert!(matches!(
        store.upload_plane(output, PlaneCoord::new(0, 0, 1), &Array2::zeros((3, 3))),
        Err(StoreError::UploadShapeMismatch { .. })
    ));
}

#[test]
fn memory_sink_rejects_out_of_order_uploads() {
    let mut store = MemoryStore::new();
    let output = store.create_output_image(&spec()).expect("create");
    let plane = Array2::zeros((2, 2));
    let error = store
        .upload_plane(output, PlaneCoord::new(0, 0, 1), &plane)
        .expect_err("skipped the first coordinate");
    assert!(matches!(
        error,
        StoreError::UploadOutOfOrder { expected, actual, .. }
            if expected == PlaneCoord::new(0, 0, 0) && actual == PlaneCoord::new(0, 0, 1)
    ));
    store
        .upload_plane(output, PlaneCoord::new(0, 0, 0), &plane)
        .expect("first in order");
    store
        .upload_plane(output, PlaneCoord::new(0, 0, 1), &plane)
        .expect("second in order");
}

#[test]
fn dir_source_lists_planes_in_sorted_order() {
    let dir = tempdir().expect("tempdir");
    for name in ["b_T1", "A_T0"] {
        let path = dir.path().join(format!("{name}.tif"));
        let plane = Array2::from_elem((2, 3), 0.5_f32);
        write_volume_tiff(&path, PixelType::F32, std::slice::from_ref(&plane)).expect("write");
    }
    let source = DirSource::open(dir.path()).expect("open");
    assert_eq!(source.len(), 2);
    let images = source.list_source_images(0).expect("list");
    assert_eq!(images[0].name, "A_T0");
    assert_eq!(images[1].name, "b_T1");
    assert_eq!((images[0].size_x, images[0].size_y), (3, 2));

    let plane = source.fetch_plane(images[0].id, 0, 0, 0).expect("fetch");
    assert_eq!(plane.pixels.dim(), (2, 3));
    assert!(matches!(
        source.fetch_plane(images[0].id, 1, 0, 0),
        Err(StoreError::PlaneNotFound { .. })
    ));
}

#[test]
fn tiff_sink_materializes_volume_and_sidecar() {
    let dir = tempdir().expect("tempdir");
    let mut sink = TiffSink::new(dir.path());
    let output = sink.create_output_image(&spec()).expect("create");
    for t in 0..2 {
        let plane = Array2::from_elem((2, 2), t as f32 * 0.5);
        sink.upload_plane(output, PlaneCoord::new(0, 0, t), &plane)
            .expect("upload");
    }
    sink.set_channel_display_range(output, 0, 0.0, 0.5, crate::model::Rgba::GREEN)
        .expect("range");
    sink.rename_channel(output, 0, "GFP").expect("rename");
    let path = sink.finish(output).expect("finish");
    assert!(path.exists());

    let sidecar_raw =
        std::fs::read_to_string(dir.path().join("combinedImage.json")).expect("sidecar");
    let sidecar: VolumeSidecar = serde_json::from_str(&sidecar_raw).expect("parse");
    assert_eq!(sidecar.size_t, 2);
    assert_eq!(sidecar.channels[0].label.as_deref(), Some("GFP"));
    assert_eq!(sidecar.channels[0].max, 0.5);
}

#[test]
fn tiff_sink_refuses_to_finish_a_partial_volume() {
    let dir = tempdir().expect("tempdir");
    let mut sink = TiffSink::new(dir.path());
    let output = sink.create_output_image(&spec()).expect("create");
    sink.upload_plane(output, PlaneCoord::new(0, 0, 0), &Array2::zeros((2, 2)))
        .expect("upload");
    assert!(matches!(
        sink.finish(output),
        Err(StoreError::IncompleteVolume {
            expected: 2,
            actual: 1,
            ..
        })
    ));
}

#[test]
fn dir_source_serves_planes_without_rereading_files() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("plane_T0.tif");
    let plane = Array2::from_elem((2, 3), 0.25_f32);
    write_volume_tiff(&path, PixelType::F32, std::slice::from_ref(&plane)).expect("write");

    let source = DirSource::open(dir.path()).expect("open");
    std::fs::remove_file(&path).expect("remove");
    let fetched = source.fetch_plane(1, 0, 0, 0).expect("fetch");
    assert_eq!(fetched.pixels, plane);
}
