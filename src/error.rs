use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RopeError {
    #[error("rope input must be text or a sequence of text chunks")]
    InvalidConstructionInput,

    #[error("rope index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("slice step cannot be zero")]
    InvalidSliceStep,

    #[error("rope indices must be integers or slices, not {found}")]
    UnsupportedIndexType { found: String },
}

pub type Result<T> = std::result::Result<T, RopeError>;
