use std::{fmt, io, num::TryFromIntError};
use png::EncodingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputNotFound,
    MalformedHeader,
    UnknownTileType,
    MalformedTileRecord,
    InvalidPixelSize,
    CanvasTooLarge,
    Config,
    Io,
    Encoding,
    Other,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error {
            kind,
            message: message.into(),
        }
    }

    /// Error for a tile line that could not be turned into a tile.
    pub fn tile_record(kind: ErrorKind, line_no: usize, line: &str, reason: &str) -> Self {
        Error {
            kind,
            message: format!("line {}: {} ({:?})", line_no, reason, line),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error { }

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            message: value.to_string()
        }
    }
}

impl From<TryFromIntError> for Error {
    fn from(value: TryFromIntError) -> Self {
        Error {
            kind: ErrorKind::Other,
            message: value.to_string()
        }
    }
}

impl From<EncodingError> for Error {
    fn from(value: EncodingError) -> Self {
        Error {
            kind: ErrorKind::Encoding,
            message: value.to_string()
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Config,
            message: value.to_string()
        }
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error {
            kind: ErrorKind::Other,
            message: value.to_string()
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error {
            kind: ErrorKind::Other,
            message: value
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
