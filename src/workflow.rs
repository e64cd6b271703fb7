mod error;
mod execute;
mod io;
mod report;
mod spec;

#[cfg(test)]
mod tests;

pub use error::{Result, WorkflowError};
pub use execute::{derive_groups, run_combine, run_groups};
pub use io::{load_spec, save_report};
pub use report::{ChannelReport, CombineReport, GroupReport};
pub use spec::CombineSpec;
