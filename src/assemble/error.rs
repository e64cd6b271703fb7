use thiserror::Error;

use crate::model::{ImageId, PlaneCoord};
use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, AssembleError>;

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("failed to fetch plane for destination {coord}: {source}")]
    Fetch {
        coord: PlaneCoord,
        #[source]
        source: StoreError,
    },

    #[error(
        "source image {image} supplied a {actual_y}x{actual_x} plane for {coord}, \
         expected {expected_y}x{expected_x}"
    )]
    PlaneShapeMismatch {
        image: ImageId,
        coord: PlaneCoord,
        expected_y: usize,
        expected_x: usize,
        actual_y: usize,
        actual_x: usize,
    },

    #[error("output store rejected a write: {0}")]
    Sink(#[from] StoreError),
}
