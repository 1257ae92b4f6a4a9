use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("invalid source name for line directive: {0:?}")]
    InvalidSourceName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
