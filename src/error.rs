use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("board must be at least 1x1, got {width}x{height}")]
    InvalidBoard { width: i32, height: i32 },

    #[error("input thread terminated abnormally")]
    InputThread,
}

pub type Result<T> = std::result::Result<T, Error>;
