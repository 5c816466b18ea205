//! Whole-sector reads

use crate::error::{Iso9660Error, Result};
use crate::types::SECTOR_SIZE;
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

/// One logical sector worth of image data
pub type SectorBuf = [u8; SECTOR_SIZE];

/// Read sector `sector` of the image
///
/// Fails with `InvalidOffset` when the sector is not fully inside the image.
pub fn read_sector<B: BlockIo>(block_io: &mut B, sector: u32) -> Result<SectorBuf> {
    read_sector_prefix(block_io, sector, SECTOR_SIZE)
}

/// Read only the first `len` bytes of sector `sector`; the rest stays zeroed.
///
/// Images that are not padded to a whole sector end partway through their
/// last sector. Byte-addressed devices such as [`ImageFile`](super::ImageFile)
/// serve such a short read; block devices may refuse it.
pub fn read_sector_prefix<B: BlockIo>(
    block_io: &mut B,
    sector: u32,
    len: usize,
) -> Result<SectorBuf> {
    let mut buffer = [0u8; SECTOR_SIZE];
    let len = len.min(SECTOR_SIZE);
    block_io
        .read_blocks(Lba(u64::from(sector)), &mut buffer[..len])
        .map_err(|err| {
            log::debug!("reading {len} bytes of sector {sector} failed: {err:?}");
            Iso9660Error::InvalidOffset
        })?;
    Ok(buffer)
}
