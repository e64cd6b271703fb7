mod api;
mod dir;
mod error;
mod memory;

#[cfg(test)]
mod tests;

pub use api::{OutputImageSpec, OutputSink, SourceStore};
pub use dir::{DirSource, SidecarChannel, TiffSink, VolumeSidecar};
pub use error::{Result, StoreError};
pub use memory::{ChannelSettings, MemoryStore, OutputRecord};
