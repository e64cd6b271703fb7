mod error;
mod extract;
mod set;

#[cfg(test)]
mod tests;

pub use error::{PatternError, Result};
pub use extract::{RawTokens, extract};
pub use set::{DISABLED, PatternSet, preset, preset_keys};
