//! Global little-endian pointer substitution.
//!
//! Pairs are applied one after another to the same buffer, so a pair sees the
//! bytes written by every pair before it. After a replacement the search for
//! the same pair resumes right after the 4 written bytes.

use memchr::memmem;
use serde::Serialize;
use tracing::debug;

use crate::map::{PointerMap, PointerPair};

/// One 4-byte overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub old: u32,
    pub new: u32,
    /// Absolute offset in the buffer
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointerCount {
    pub old: u32,
    pub new: u32,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubstitutionReport {
    pub total: usize,
    /// One entry per map pair, in map order
    pub per_pointer: Vec<PointerCount>,
    /// Every replacement, in the order performed
    pub replacements: Vec<Replacement>,
}

impl SubstitutionReport {
    pub fn is_noop(&self) -> bool {
        self.total == 0
    }
}

/// Replace every little-endian occurrence of each old pointer in `buffer`.
pub fn apply(buffer: &mut [u8], map: &PointerMap) -> SubstitutionReport {
    let mut report = SubstitutionReport::default();

    for pair in map.iter() {
        let count = replace_all(buffer, *pair, &mut report.replacements);
        if count > 0 {
            debug!(
                "Pointer 0x{:08X} -> 0x{:08X} replaced {} time(s)",
                pair.old, pair.new, count
            );
        }
        report.per_pointer.push(PointerCount {
            old: pair.old,
            new: pair.new,
            count,
        });
        report.total += count;
    }

    report
}

fn replace_all(buffer: &mut [u8], pair: PointerPair, log: &mut Vec<Replacement>) -> usize {
    let old_bytes = pair.old.to_le_bytes();
    let new_bytes = pair.new.to_le_bytes();
    let finder = memmem::Finder::new(&old_bytes);

    let mut start = 0;
    let mut count = 0;
    while let Some(pos) = finder.find(&buffer[start..]) {
        let offset = start + pos;
        buffer[offset..offset + 4].copy_from_slice(&new_bytes);
        log.push(Replacement {
            old: pair.old,
            new: pair.new,
            offset,
        });
        count += 1;
        start = offset + 4;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(u32, u32)]) -> PointerMap {
        let mut map = PointerMap::new();
        for &(old, new) in pairs {
            map.insert(old, new);
        }
        map
    }

    #[test]
    fn test_apply_replaces_single_pointer() {
        let mut buffer = vec![0u8; 0x80];
        buffer[0x40..0x44].copy_from_slice(&[0x51, 0x01, 0x00, 0x08]);
        let map = map_of(&[(0x0800_0151, 0x0800_0161)]);

        let report = apply(&mut buffer, &map);
        assert_eq!(&buffer[0x40..0x44], &[0x61, 0x01, 0x00, 0x08]);
        assert_eq!(report.total, 1);
        assert_eq!(
            report.replacements,
            vec![Replacement {
                old: 0x0800_0151,
                new: 0x0800_0161,
                offset: 0x40
            }]
        );
    }

    #[test]
    fn test_apply_finds_unaligned_and_repeated_occurrences() {
        let old = 0x0800_0151u32.to_le_bytes();
        let mut buffer = vec![0xEEu8; 16];
        buffer[1..5].copy_from_slice(&old);
        buffer[5..9].copy_from_slice(&old);
        buffer[11..15].copy_from_slice(&old);
        let map = map_of(&[(0x0800_0151, 0x0800_0999)]);

        let report = apply(&mut buffer, &map);
        let offsets: Vec<usize> = report.replacements.iter().map(|r| r.offset).collect();
        assert_eq!(offsets, vec![1, 5, 11]);
        assert_eq!(report.per_pointer[0].count, 3);
    }

    #[test]
    fn test_apply_resumes_after_replaced_bytes() {
        // 01 01 01 01 01: matches at 0 and 1 overlap, only 0 is replaced
        let mut buffer = vec![0x01u8; 5];
        let map = map_of(&[(0x0101_0101, 0x0202_0202)]);

        let report = apply(&mut buffer, &map);
        assert_eq!(report.total, 1);
        assert_eq!(buffer, vec![0x02, 0x02, 0x02, 0x02, 0x01]);
    }

    #[test]
    fn test_apply_chains_through_earlier_pairs() {
        // A's new value equals B's old value and A runs first
        let mut buffer = 0x100u32.to_le_bytes().to_vec();
        let map = map_of(&[(0x100, 0x200), (0x200, 0x300)]);

        let report = apply(&mut buffer, &map);
        assert_eq!(buffer, 0x300u32.to_le_bytes().to_vec());
        assert_eq!(report.total, 2);
        assert_eq!(report.replacements[1].offset, 0);
    }

    #[test]
    fn test_apply_order_matters() {
        let mut buffer = 0x100u32.to_le_bytes().to_vec();
        let map = map_of(&[(0x200, 0x300), (0x100, 0x200)]);

        apply(&mut buffer, &map);
        assert_eq!(buffer, 0x200u32.to_le_bytes().to_vec());
    }

    #[test]
    fn test_second_pass_is_noop() {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&0x0800_0151u32.to_le_bytes());
        buffer.extend_from_slice(&[0xAA; 3]);
        buffer.extend_from_slice(&0x0800_0300u32.to_le_bytes());
        let map = map_of(&[(0x0800_0151, 0x0800_0161), (0x0800_0300, 0x0800_0400)]);

        let first = apply(&mut buffer, &map);
        assert_eq!(first.total, 2);

        let snapshot = buffer.clone();
        let second = apply(&mut buffer, &map);
        assert!(second.is_noop());
        assert_eq!(buffer, snapshot);
    }

    #[test]
    fn test_apply_no_match_reports_zero() {
        let mut buffer = vec![0u8; 32];
        let map = map_of(&[(0x0800_0151, 0x0800_0161)]);
        let report = apply(&mut buffer, &map);
        assert!(report.is_noop());
        assert_eq!(report.per_pointer.len(), 1);
        assert!(buffer.iter().all(|&b| b == 0));
    }
}
