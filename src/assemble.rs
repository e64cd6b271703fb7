mod channels;
mod engine;
mod error;
mod pixel_size;


pub use channels::{resolve_channel_colours, resolve_channel_names};
pub use engine::{AssemblyStats, ChannelRange, assemble_volume};
pub use error::{AssembleError, Result};
pub use pixel_size::reconcile_pixel_size;
