use serde::Serialize;

use crate::hex::ByteSequence;

/// One match of a target sequence, relative to the scanned window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Index of the matched sequence in the order the sequences were supplied
    pub sequence_index: usize,
    /// Offset of the match inside the window
    pub offset: usize,
}

/// An occurrence dropped because the chosen byte lies outside its sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedOccurrence {
    /// Absolute file offset of the match start
    pub match_offset: usize,
    pub sequence: ByteSequence,
}

/// Result of scanning one ROM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// Number of raw matches across all sequences, skipped ones included
    pub occurrences: usize,
    /// Absolute target offsets, ascending
    pub target_offsets: Vec<usize>,
    pub skipped: Vec<SkippedOccurrence>,
}

impl ScanResult {
    pub fn len(&self) -> usize {
        self.target_offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target_offsets.is_empty()
    }
}
