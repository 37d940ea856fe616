use thiserror::Error;

/// Errors reported by the block-sorting transforms. All of them are fail-fast:
/// a call that returns an error has produced no output.
#[derive(Error, Debug)]
pub enum BwtError {
    /// Required input missing or unusable, e.g. a block too large for the 32 bit index.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A rank or index outside its valid domain.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Input shorter than its declared framing, or containing impossible values.
    #[error("Malformed stream: {0}")]
    MalformedStream(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BwtError>;
