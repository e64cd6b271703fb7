mod assigner;
mod error;
mod layout;


pub use assigner::{assign_planes, name_sort_key};
pub use error::{AssignError, Result};
pub use layout::{Collision, VolumeLayout};
