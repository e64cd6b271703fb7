use thiserror::Error;

use crate::assemble::AssembleError;
use crate::assign::AssignError;
use crate::pattern::PatternError;
use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, WorkflowError>;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("combine specification parse failure: {0}")]
    Parse(String),

    #[error("combine I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("combine serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("combine YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("pattern configuration failed: {0}")]
    Pattern(#[from] PatternError),

    #[error("index assignment failed: {0}")]
    Assign(#[from] AssignError),

    #[error("assembly failed: {0}")]
    Assemble(#[from] AssembleError),

    #[error("image store failure: {0}")]
    Store(#[from] StoreError),
}
