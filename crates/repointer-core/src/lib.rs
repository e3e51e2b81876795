//! # repointer-core
//!
//! Core library for the global ROM pointer repointer.
//!
//! This crate provides:
//! - Marker scanning over ROM images (`scan`)
//! - File offset to pointer conversion (`pointer`)
//! - Old→new pointer map construction with count-parity checking (`map`)
//! - Global little-endian pointer substitution (`substitute`)
//! - The run report and its JSON summary (`report`)
//! - The end-to-end pipeline (`repointer`)

pub mod error;
pub mod hex;
pub mod map;
pub mod params;
pub mod pointer;
pub mod report;
pub mod repointer;
pub mod rom;
pub mod scan;
pub mod substitute;

pub use error::{Error, ErrorClass, Result};
pub use hex::{ByteSequence, format_bytes, format_le_bytes};
pub use map::{DuplicateKey, PointerMap, PointerPair};
pub use params::{RawParams, RepointConfig, RepointConfigBuilder, RepointParams};
pub use pointer::{BASE_ADDRESS, to_pointer};
pub use report::{DEFAULT_REPORT_FILE, RunLog, RunSummary};
pub use repointer::{Repointer, RunOutcome};
pub use rom::{RomRole, read_rom, write_rom_atomic};
pub use scan::{MarkerScanner, ScanResult, ScanWindow, SkippedOccurrence};
pub use substitute::{PointerCount, Replacement, SubstitutionReport};
