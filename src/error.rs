use std::io;

use thiserror::Error;

/// Errors raised outside the tracing core.
///
/// Tracing itself never fails; these cover loading scene descriptions, saving
/// images and driving the worker pool.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed scene description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    #[error("Render worker pool disconnected")]
    PoolDisconnected,
}

pub type Result<T> = std::result::Result<T, Error>;
