mod api;
mod error;
mod raster;
mod tiff;
mod util;

#[cfg(test)]
mod tests;

pub use api::{read_plane, supported_plane_formats, write_volume_tiff};
pub use error::{IoError, Result};
