//! File offset to pointer value conversion.

use crate::error::{Error, Result};

/// Address at which the cartridge ROM is mapped on the target hardware.
pub const BASE_ADDRESS: u32 = 0x0800_0000;

/// Convert a file offset to the pointer value code would use to reference it.
pub fn to_pointer(offset: usize, use_base: bool) -> Result<u32> {
    let base = if use_base { BASE_ADDRESS } else { 0 };
    u32::try_from(offset)
        .ok()
        .and_then(|offset| offset.checked_add(base))
        .ok_or(Error::PointerOverflow { offset })
}

/// Convert a list of offsets, keeping their order.
pub fn to_pointers(offsets: &[usize], use_base: bool) -> Result<Vec<u32>> {
    offsets
        .iter()
        .map(|&offset| to_pointer(offset, use_base))
        .collect()
}
