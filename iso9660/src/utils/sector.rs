//! Sector alignment and calculation utilities

use crate::types::SECTOR_SIZE;

/// Convert sector number to byte offset
pub fn sector_to_byte(sector: u32) -> u64 {
    u64::from(sector) * SECTOR_SIZE as u64
}

/// Calculate number of sectors needed for byte count
pub fn sectors_for_bytes(byte_count: u32) -> u32 {
    byte_count.div_ceil(SECTOR_SIZE as u32)
}

/// Bytes consumed within one directory sector.
///
/// Directory records never straddle a sector boundary, so the builder tracks
/// how much of the current sector is left and pads forward when another
/// record cannot fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorBudget {
    used: usize,
}

impl SectorBudget {
    /// Fresh budget at the start of a sector
    pub const fn new() -> Self {
        Self { used: 0 }
    }

    /// Offset of the next record within the sector
    pub fn offset(&self) -> usize {
        self.used
    }

    /// Bytes left before the sector boundary
    pub fn remaining(&self) -> usize {
        SECTOR_SIZE - self.used
    }

    /// Whether a record of `min_len` bytes can still start in this sector
    pub fn fits_record(&self, min_len: usize) -> bool {
        self.remaining() >= min_len
    }

    /// Account for a decoded record; saturates at the sector boundary
    pub fn consume(&mut self, len: usize) {
        self.used = (self.used + len).min(SECTOR_SIZE);
    }

    /// Bytes to skip to reach the next boundary, resetting the budget
    pub fn pad_to_boundary(&mut self) -> usize {
        let skipped = self.remaining();
        self.used = 0;
        skipped
    }
}

impl Default for SectorBudget {
    fn default() -> Self {
        Self::new()
    }
}
