//! File reader implementation

use crate::device::{read_sector, read_sector_prefix};
use crate::error::{Iso9660Error, Result};
use crate::file::extent::Extent;
use crate::types::SECTOR_SIZE;
use gpt_disk_io::BlockIo;

/// Streaming reader over one extent
///
/// Each call returns at most one sector's worth of data, so large files are
/// never held in memory.
pub struct ExtentReader<'a, B: BlockIo> {
    block_io: &'a mut B,
    extent: Extent,
    position: u64,
}

impl<'a, B: BlockIo> ExtentReader<'a, B> {
    /// Create new reader positioned at the start of `extent`
    pub fn new(block_io: &'a mut B, extent: Extent) -> Self {
        Self {
            block_io,
            extent,
            position: 0,
        }
    }

    /// Read bytes from current position
    ///
    /// Returns number of bytes read, 0 at end of extent. When the extent ends
    /// inside the image's last, unpadded sector only the bytes still owed are
    /// read from it.
    pub fn read_chunk(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let remaining = self.remaining();
        if remaining == 0 || buffer.is_empty() {
            return Ok(0);
        }

        let sector_offset = u32::try_from(self.position / SECTOR_SIZE as u64)
            .map_err(|_| Iso9660Error::InvalidOffset)?;
        let offset_in_sector = (self.position % SECTOR_SIZE as u64) as usize;
        let lba = self
            .extent
            .lba
            .checked_add(sector_offset)
            .ok_or(Iso9660Error::InvalidOffset)?;

        let left_in_sector = SECTOR_SIZE - offset_in_sector;
        let sector = match read_sector(&mut *self.block_io, lba) {
            Ok(sector) => sector,
            Err(_) if remaining <= left_in_sector as u64 => {
                let tail = offset_in_sector + remaining as usize;
                log::debug!("sector {lba} is short, reading its first {tail} bytes");
                read_sector_prefix(&mut *self.block_io, lba, tail)?
            }
            Err(err) => return Err(err),
        };

        let chunk = left_in_sector
            .min(buffer.len())
            .min(usize::try_from(remaining).unwrap_or(usize::MAX));
        buffer[..chunk].copy_from_slice(&sector[offset_in_sector..offset_in_sector + chunk]);

        self.position += chunk as u64;
        Ok(chunk)
    }

    /// Extent length in bytes
    pub fn size(&self) -> u64 {
        u64::from(self.extent.length)
    }

    /// Bytes not yet returned
    pub fn remaining(&self) -> u64 {
        self.size().saturating_sub(self.position)
    }
}
