use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Malformed STB header: {0}")]
    MalformedHeader(String),

    #[error("Payload size mismatch for {width}x{height}: expected {expected} bytes, got {actual}")]
    PayloadSizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
