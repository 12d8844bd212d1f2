use std::path::PathBuf;

use thiserror::Error;

/// Plain classification of an [`Error`], without context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    DecodeFailure,
    EncodeFailure,
    InvalidInput,
}

#[derive(Error, Debug)]
pub enum Error {
    /// Input file is missing or cannot be read
    #[error("input not found or unreadable: {}", .path.display())]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input file is not a decodable image
    #[error("failed to decode {}", .path.display())]
    DecodeFailure {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Image could not be encoded as PNG
    #[error("failed to encode {}", .path.display())]
    EncodeFailure {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Encoded bytes could not be written to the output path
    #[error("failed to write {}", .path.display())]
    WriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Empty color list or unusable tolerance
    #[error("invalid removal set: {0}")]
    InvalidRemovalSet(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::DecodeFailure { .. } => ErrorKind::DecodeFailure,
            Error::EncodeFailure { .. } | Error::WriteFailure { .. } => ErrorKind::EncodeFailure,
            Error::InvalidRemovalSet(_) => ErrorKind::InvalidInput,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
