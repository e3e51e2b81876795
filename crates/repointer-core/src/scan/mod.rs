//! Marker scanning over ROM buffers.
//!
//! Every target sequence is searched independently inside the window with an
//! overlap-permitting forward search. Matches from all sequences are merged
//! and stable-sorted by offset, so ties keep the order the sequences were
//! supplied in.

mod types;
mod window;

use memchr::memmem;
use tracing::{debug, warn};

use crate::hex::ByteSequence;

pub use types::*;
pub use window::*;

pub struct MarkerScanner<'a> {
    sequences: &'a [ByteSequence],
    offset_in_sequence: usize,
}

impl<'a> MarkerScanner<'a> {
    pub fn new(sequences: &'a [ByteSequence], offset_in_sequence: usize) -> Self {
        Self {
            sequences,
            offset_in_sequence,
        }
    }

    /// Scan `buffer` inside `window` and return the absolute target offsets.
    pub fn scan(&self, buffer: &[u8], window: ScanWindow) -> ScanResult {
        let haystack = window.slice(buffer);
        debug!(
            "Scanning {} bytes ({}) for {} sequence(s)",
            haystack.len(),
            window,
            self.sequences.len()
        );

        let mut occurrences: Vec<Occurrence> = Vec::new();
        for (sequence_index, sequence) in self.sequences.iter().enumerate() {
            let found = find_overlapping(haystack, sequence.as_bytes());
            debug!("  {}: {} match(es)", sequence, found.len());
            occurrences.extend(found.into_iter().map(|offset| Occurrence {
                sequence_index,
                offset,
            }));
        }

        // Stable: equal offsets stay in sequence order
        occurrences.sort_by_key(|o| o.offset);

        let mut result = ScanResult {
            occurrences: occurrences.len(),
            ..Default::default()
        };

        for occurrence in &occurrences {
            let sequence = &self.sequences[occurrence.sequence_index];
            let match_offset = window.start() + occurrence.offset;

            if self.offset_in_sequence >= sequence.len() {
                warn!(
                    "Offset in sequence {} is out of range for {} (length {}), skipping match at 0x{:X}",
                    self.offset_in_sequence,
                    sequence,
                    sequence.len(),
                    match_offset
                );
                result.skipped.push(SkippedOccurrence {
                    match_offset,
                    sequence: sequence.clone(),
                });
                continue;
            }

            result
                .target_offsets
                .push(match_offset + self.offset_in_sequence);
        }

        result
    }
}

/// All start positions of `needle` in `haystack`, overlapping matches included.
fn find_overlapping(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    let finder = memmem::Finder::new(needle);
    let mut positions = Vec::new();
    let mut start = 0;

    while start < haystack.len() {
        match finder.find(&haystack[start..]) {
            Some(pos) => {
                positions.push(start + pos);
                start += pos + 1;
            }
            None => break,
        }
    }

    positions
}
