use thiserror::Error;

use crate::formats::IoError;
use crate::model::{ImageId, PlaneCoord};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("source image {0} does not exist")]
    ImageNotFound(ImageId),

    #[error("plane (z={z}, c={c}, t={t}) does not exist in source image {image}")]
    PlaneNotFound {
        image: ImageId,
        z: usize,
        c: usize,
        t: usize,
    },

    #[error("output image {0} does not exist")]
    OutputNotFound(ImageId),

    #[error("duplicate upload to output image {output} at {coord}")]
    DuplicateUpload { output: ImageId, coord: PlaneCoord },

    #[error("upload to output image {output} at {coord} lies outside the declared extents")]
    UploadOutOfBounds { output: ImageId, coord: PlaneCoord },

    #[error("upload to output image {output} at {actual} arrived out of order, expected {expected}")]
    UploadOutOfOrder {
        output: ImageId,
        expected: PlaneCoord,
        actual: PlaneCoord,
    },

    #[error("output image {output} holds {actual} of {expected} planes and cannot be finished")]
    IncompleteVolume {
        output: ImageId,
        expected: usize,
        actual: usize,
    },

    #[error(
        "uploaded plane for output image {output} is {actual_y}x{actual_x}, \
         expected {expected_y}x{expected_x}"
    )]
    UploadShapeMismatch {
        output: ImageId,
        expected_y: usize,
        expected_x: usize,
        actual_y: usize,
        actual_x: usize,
    },

    #[error("output image {output} has no channel {channel}")]
    UnknownChannel { output: ImageId, channel: usize },

    #[error("store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("plane decode/encode failure: {0}")]
    Format(#[from] IoError),
}
