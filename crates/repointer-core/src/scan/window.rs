use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::rom::RomRole;

/// Half-open byte range `[start, end)` over a ROM buffer.
///
/// `end == None` scans to the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanWindow {
    start: usize,
    end: Option<usize>,
}

impl ScanWindow {
    pub fn new(role: RomRole, start: usize, end: Option<usize>) -> Result<Self> {
        if let Some(end) = end
            && end <= start
        {
            return Err(Error::InvalidWindow { role, start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering a whole buffer.
    pub fn full() -> Self {
        Self {
            start: 0,
            end: None,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// The part of `buffer` inside this window, clamped to the buffer length.
    pub fn slice<'b>(&self, buffer: &'b [u8]) -> &'b [u8] {
        let len = buffer.len();
        let start = self.start.min(len);
        let end = self.end.map_or(len, |end| end.min(len));
        &buffer[start..end]
    }
}

impl fmt::Display for ScanWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "0x{:X} - 0x{:X}", self.start, end),
            None => write!(f, "0x{:X} - EOF", self.start),
        }
    }
}
