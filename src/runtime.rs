mod combine_service;
mod context;
mod error;

pub use combine_service::{CombineService, LayoutInfo};
pub use context::AppContext;
pub use error::{AppError, Result};
