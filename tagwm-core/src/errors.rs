use thiserror::Error;

pub type Result<T> = std::result::Result<T, TagwmError>;

#[derive(Debug, Error)]
pub enum TagwmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("nothing to spawn, the command line is empty")]
    EmptyCommand,
}
