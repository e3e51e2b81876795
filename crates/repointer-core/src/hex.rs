//! Hex text parsing and byte formatting.
//!
//! All user-supplied hex text is turned into typed values here; nothing past
//! this module handles raw strings.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// An immutable, non-empty marker byte sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteSequence(Box<[u8]>);

impl ByteSequence {
    /// Parse a sequence such as `"00FB"` or `"00 fb"`.
    ///
    /// Whitespace may separate bytes but never splits one.
    pub fn from_hex(text: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidSequence {
            input: text.to_string(),
            reason: reason.to_string(),
        };

        let mut bytes = Vec::with_capacity(text.len() / 2);
        let mut chars = text.chars();
        while let Some(high) = chars.next() {
            if high.is_whitespace() {
                continue;
            }
            let Some(low) = chars.next() else {
                return Err(invalid("odd number of hex digits"));
            };
            if low.is_whitespace() {
                return Err(invalid(&format!("whitespace inside byte '{}{}'", high, low)));
            }
            match (high.to_digit(16), low.to_digit(16)) {
                (Some(h), Some(l)) => bytes.push(((h << 4) | l) as u8),
                _ => return Err(invalid(&format!("bad byte '{}{}'", high, low))),
            }
        }

        if bytes.is_empty() {
            return Err(invalid("sequence is empty"));
        }
        Ok(Self(bytes.into_boxed_slice()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ByteSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl Serialize for ByteSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a comma-separated list of sequences, e.g. `"00FB,02FB"`.
pub fn parse_sequence_list(text: &str) -> Result<Vec<ByteSequence>> {
    text.split(',').map(|s| ByteSequence::from_hex(s.trim())).collect()
}

/// Parse a hex offset string (with or without 0x prefix).
pub fn parse_hex_offset(text: &str) -> Result<usize> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    usize::from_str_radix(digits, 16).map_err(|e| Error::InvalidHex {
        input: text.to_string(),
        reason: e.to_string(),
    })
}

/// Parse an offset given in decimal, or with a `0x`, `0o` or `0b` radix prefix.
pub fn parse_offset_in_sequence(text: &str) -> Result<usize> {
    let trimmed = text.trim();
    let lower = trimmed.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else {
        (lower.as_str(), 10)
    };

    usize::from_str_radix(digits, radix).map_err(|e| Error::InvalidOffsetInSequence {
        input: text.to_string(),
        reason: e.to_string(),
    })
}

/// Format bytes as space-separated uppercase hex, e.g. `"51 01 00 08"`.
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a 32-bit value as its little-endian byte string.
pub fn format_le_bytes(value: u32) -> String {
    format_bytes(&value.to_le_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_sequence_from_hex() {
        let seq = ByteSequence::from_hex("00FB").unwrap();
        assert_eq!(seq.as_bytes(), &[0x00, 0xFB]);
        assert_eq!(seq.len(), 2);

        let spaced = ByteSequence::from_hex("00 fb").unwrap();
        assert_eq!(spaced, seq);
        assert_eq!(spaced.to_string(), "00FB");
    }

    #[test]
    fn test_byte_sequence_rejects_bad_input() {
        assert!(matches!(
            ByteSequence::from_hex(""),
            Err(Error::InvalidSequence { .. })
        ));
        assert!(ByteSequence::from_hex("0FB").is_err());
        assert!(ByteSequence::from_hex("ZZ").is_err());
        assert!(ByteSequence::from_hex("é1").is_err());
        assert!(ByteSequence::from_hex("+F+B").is_err());
        assert!(ByteSequence::from_hex("   ").is_err());
    }

    #[test]
    fn test_byte_sequence_whitespace_only_between_bytes() {
        assert_eq!(
            ByteSequence::from_hex(" 00\tFB ").unwrap().as_bytes(),
            &[0x00, 0xFB]
        );
        let err = ByteSequence::from_hex("0 0FB").unwrap_err();
        assert!(err.to_string().contains("whitespace inside byte"));
    }

    #[test]
    fn test_parse_sequence_list() {
        let seqs = parse_sequence_list("00FB, 02FB").unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[1].as_bytes(), &[0x02, 0xFB]);

        // Trailing comma yields an empty sequence
        assert!(parse_sequence_list("00FB,").is_err());
    }

    #[test]
    fn test_parse_hex_offset() {
        assert_eq!(parse_hex_offset("0x1000").unwrap(), 0x1000);
        assert_eq!(parse_hex_offset("0X1000").unwrap(), 0x1000);
        assert_eq!(parse_hex_offset("1a0").unwrap(), 0x1A0);
        assert!(parse_hex_offset("GHIJK").is_err());
        assert!(parse_hex_offset("").is_err());
    }

    #[test]
    fn test_parse_offset_in_sequence() {
        assert_eq!(parse_offset_in_sequence("1").unwrap(), 1);
        assert_eq!(parse_offset_in_sequence("0x10").unwrap(), 16);
        assert_eq!(parse_offset_in_sequence("0b11").unwrap(), 3);
        assert_eq!(parse_offset_in_sequence("0o7").unwrap(), 7);
        assert!(matches!(
            parse_offset_in_sequence("-1"),
            Err(Error::InvalidOffsetInSequence { .. })
        ));
        assert!(parse_offset_in_sequence("abc").is_err());
    }

    #[test]
    fn test_format_le_bytes() {
        assert_eq!(format_le_bytes(0x0800_0151), "51 01 00 08");
        assert_eq!(format_bytes(&[]), "");
    }
}
