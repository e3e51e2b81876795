//! Text layout of report lines.

use crate::hex::format_le_bytes;
use crate::map::{DuplicateKey, PointerPair};
use crate::substitute::Replacement;

pub const RULE: &str =
    "--------------------------------------------------------------------------------";

pub fn map_table_header() -> String {
    format!(
        "{:<12} | {:<12} | -> | {:<12} | {}",
        "Old Value", "Old Bytes LE", "New Value", "New Bytes LE"
    )
}

pub fn map_table_row(pair: &PointerPair) -> String {
    format!(
        "0x{:08X}   | {:<12} | -> | 0x{:08X}   | {}",
        pair.old,
        format_le_bytes(pair.old),
        pair.new,
        format_le_bytes(pair.new)
    )
}

pub fn duplicate_line(dup: &DuplicateKey) -> String {
    format!(
        "Duplicate old pointer 0x{:08X}: pairing with 0x{:08X} replaced by 0x{:08X}",
        dup.old, dup.discarded, dup.kept
    )
}

pub fn substitution_header() -> String {
    "Old pointer (LE bytes) | New pointer (LE bytes) | Offset in modified ROM".to_string()
}

pub fn substitution_row(replacement: &Replacement) -> String {
    format!(
        "0x{:08X} ({}) | 0x{:08X} ({}) | 0x{:08X}",
        replacement.old,
        format_le_bytes(replacement.old),
        replacement.new,
        format_le_bytes(replacement.new),
        replacement.offset
    )
}
