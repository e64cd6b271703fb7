mod axis;
mod colour;
mod coordinate;
mod source;


pub use axis::{Dimension, PixelType};
pub use colour::Rgba;
pub use coordinate::{PlaneCoord, SourceLocator};
pub use source::{DatasetId, ImageId, PhysicalSize, PlaneData, SourceImage};
