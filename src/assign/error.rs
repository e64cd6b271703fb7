use crate::model::Dimension;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssignError>;

#[derive(Debug, Error)]
pub enum AssignError {
    #[error(
        "{dimension} token `{token}` in source image `{image}` is not a numeric index; \
         the pattern is misconfigured"
    )]
    MalformedToken {
        dimension: Dimension,
        image: String,
        token: String,
    },

    #[error("no source images to assign")]
    EmptySelection,
}
