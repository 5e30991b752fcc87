use std::fmt;

/// Result type for gpusmi-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors raised when parsing output settings
#[derive(Debug)]
pub enum Error {
    /// Output format string is not one of the supported formats
    UnsupportedFormat(String),
    /// Compatibility string is not one of the supported modes
    UnsupportedCompatibility(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedFormat(value) => write!(
                f,
                "unsupported output format: {} (expected json, csv, or human_readable)",
                value
            ),
            Error::UnsupportedCompatibility(value) => write!(
                f,
                "unsupported compatibility mode: {} (expected amdsmi, rocmsmi, or gpuvsmi)",
                value
            ),
        }
    }
}

impl std::error::Error for Error {}
