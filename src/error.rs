//! Error taxonomy shared by the compressor, the bit channel and the image layer.

use std::collections::TryReserveError;

use thiserror::Error;

/// Process exit status for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Wrong arguments or unusable payload.
pub const EXIT_USAGE: i32 = 1;
/// Image is not a 24-bit BMP or 8-bit RGB PNG.
pub const EXIT_UNSUPPORTED_IMAGE: i32 = 2;
/// Image too small for the record.
pub const EXIT_CAPACITY: i32 = 3;
/// Image carries no watermark.
pub const EXIT_NO_CONTENT: i32 = 4;
/// Checksum mismatch or undecodable code stream.
pub const EXIT_DAMAGED: i32 = 5;
/// Anything else (IO, codec, allocation).
pub const EXIT_OTHER: i32 = 6;

/// Errors that can occur while hiding or extracting a payload.
#[derive(Error, Debug)]
pub enum StegimError {
    /// Empty payload, empty code sequence or an out-of-range code.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An output buffer could not be reserved.
    #[error("Allocation failed")]
    AllocationFailure,

    /// A code referenced a phrase the decoder has not seen yet.
    #[error("Dictionary corrupted: code {code} at position {position} exceeds table size {table_size}")]
    DictionaryCorruption {
        code: u16,
        table_size: usize,
        position: usize,
    },

    /// The image cannot hold the embedded record.
    #[error("Image too small to hide data: need {needed} pixels, have {available}")]
    CapacityTooSmall { needed: u64, available: u64 },

    /// The watermark is missing, the image was never used for hiding.
    #[error("No hidden content in image")]
    NoHiddenContent,

    /// The record is present but does not verify.
    #[error("Hidden content damaged: {0}")]
    DamagedContent(String),

    /// The image is not 8-bit RGB or has an unknown extension.
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// The image container could not be decoded or encoded.
    #[error("Image codec error: {0}")]
    ImageCodec(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TryReserveError> for StegimError {
    fn from(_: TryReserveError) -> Self {
        StegimError::AllocationFailure
    }
}

impl StegimError {
    /// Exit status reported by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            StegimError::InvalidInput(_) => EXIT_USAGE,
            StegimError::UnsupportedImage(_) => EXIT_UNSUPPORTED_IMAGE,
            StegimError::CapacityTooSmall { .. } => EXIT_CAPACITY,
            StegimError::NoHiddenContent => EXIT_NO_CONTENT,
            StegimError::DamagedContent(_) | StegimError::DictionaryCorruption { .. } => {
                EXIT_DAMAGED
            }
            StegimError::AllocationFailure | StegimError::ImageCodec(_) | StegimError::Io(_) => {
                EXIT_OTHER
            }
        }
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, StegimError>;
