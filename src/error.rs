use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageKitError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error), // Converts io::Error into PageKitError automatically

    #[error("Data source error: {0}")]
    SourceError(#[from] Box<dyn std::error::Error + Send + Sync>), // Wraps whatever the upstream repository raises

    #[error("Error: {0}")]
    Error(String), // Allows custom application errors
}
