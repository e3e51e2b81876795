use std::path::PathBuf;

use strum::{Display, IntoStaticStr};
use thiserror::Error;

use crate::rom::RomRole;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid hex value '{input}': {reason}")]
    InvalidHex { input: String, reason: String },

    #[error("Invalid target sequence '{input}': {reason}")]
    InvalidSequence { input: String, reason: String },

    #[error(
        "Invalid scan window for the {role}: end offset 0x{end:X} must be greater than start offset 0x{start:X}"
    )]
    InvalidWindow {
        role: RomRole,
        start: usize,
        end: usize,
    },

    #[error("Invalid offset in sequence '{input}': {reason}")]
    InvalidOffsetInSequence { input: String, reason: String },

    #[error("ROM file '{}' not found", path.display())]
    RomNotFound { path: PathBuf },

    #[error("Failed to read ROM '{}': {source}", path.display())]
    RomRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Offset 0x{offset:X} does not fit in a 32-bit pointer")]
    PointerOverflow { offset: usize },

    #[error(
        "Marker count differs between ROMs: original has {original}, modified has {modified}"
    )]
    CountMismatch { original: usize, modified: usize },

    #[error("Failed to write patched ROM '{}': {source}", path.display())]
    RomWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error classes used in the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum ErrorClass {
    InputError,
    ConsistencyError,
    IoError,
}

impl Error {
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::InvalidHex { .. }
            | Error::InvalidSequence { .. }
            | Error::InvalidWindow { .. }
            | Error::InvalidOffsetInSequence { .. }
            | Error::RomNotFound { .. }
            | Error::RomRead { .. }
            | Error::PointerOverflow { .. } => ErrorClass::InputError,
            Error::CountMismatch { .. } => ErrorClass::ConsistencyError,
            Error::RomWrite { .. } | Error::Io(_) | Error::Json(_) => ErrorClass::IoError,
        }
    }

    /// True when a ROM path did not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::RomNotFound { .. })
    }
}
