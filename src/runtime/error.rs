use crate::store::StoreError;
use crate::workflow::WorkflowError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("combine workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("image store error: {0}")]
    Store(#[from] StoreError),
}
