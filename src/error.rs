use thiserror::Error;

/// Why a scale could not be learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LearnError {
    #[error("Learned scale is full ({capacity} notes)")]
    PreGridFull { capacity: usize },
    #[error("Learn mode is not enabled")]
    NotLearning,
    #[error("A scale needs at least 2 distinct notes, got {distinct}")]
    TooFewNotes { distinct: usize },
}

/// Why a list of pitch offsets is not a valid scale.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    #[error("A scale needs between 2 and {max} offsets, got {len}")]
    Size { len: usize, max: usize },
    #[error("Scale must start at 0, found {first}")]
    Origin { first: f32 },
    #[error("Scale offsets must be strictly ascending at index {index}")]
    NotAscending { index: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid parameter JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parameter '{field}' is out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandoffError {
    #[error("Control queue is full, retry on the next tick")]
    Full,
}
