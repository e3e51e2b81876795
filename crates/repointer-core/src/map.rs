//! Old→new pointer mapping.
//!
//! Pairs are kept in insertion (scan) order, which is the order the
//! substitution pass applies them in. A repeated old pointer keeps its first
//! position and takes the value of the last pairing; each overwrite is kept
//! as a [`DuplicateKey`] so the run log can report it.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::pointer::to_pointers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointerPair {
    pub old: u32,
    pub new: u32,
}

/// A pairing that was replaced by a later one with the same old pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DuplicateKey {
    pub old: u32,
    pub discarded: u32,
    pub kept: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PointerMap {
    pairs: Vec<PointerPair>,
    #[serde(skip)]
    index: HashMap<u32, usize>,
    duplicates: Vec<DuplicateKey>,
}

impl PointerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zip old and new target offsets positionally into a map.
    ///
    /// Fails with [`Error::CountMismatch`] when the lists differ in length.
    pub fn build(old_offsets: &[usize], new_offsets: &[usize], use_base: bool) -> Result<Self> {
        if old_offsets.len() != new_offsets.len() {
            return Err(Error::CountMismatch {
                original: old_offsets.len(),
                modified: new_offsets.len(),
            });
        }

        let old_pointers = to_pointers(old_offsets, use_base)?;
        let new_pointers = to_pointers(new_offsets, use_base)?;

        let mut map = Self::new();
        for (old, new) in old_pointers.into_iter().zip(new_pointers) {
            map.insert(old, new);
        }

        debug!(
            "Built pointer map: {} pair(s), {} duplicate key(s)",
            map.len(),
            map.duplicates.len()
        );
        Ok(map)
    }

    pub fn insert(&mut self, old: u32, new: u32) {
        if let Some(&i) = self.index.get(&old) {
            let discarded = self.pairs[i].new;
            warn!(
                "Duplicate old pointer 0x{:08X}: 0x{:08X} replaced by 0x{:08X}",
                old, discarded, new
            );
            self.duplicates.push(DuplicateKey {
                old,
                discarded,
                kept: new,
            });
            self.pairs[i].new = new;
            return;
        }

        self.index.insert(old, self.pairs.len());
        self.pairs.push(PointerPair { old, new });
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in insertion order.
    pub fn pairs(&self) -> &[PointerPair] {
        &self.pairs
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointerPair> {
        self.pairs.iter()
    }

    pub fn duplicates(&self) -> &[DuplicateKey] {
        &self.duplicates
    }
}
