//! Path Table parsing
//!
//! Only the first (root) record of the type L table is read; it seeds the
//! recursive directory walk.

use crate::device::read_sector;
use crate::error::{Iso9660Error, Result};
use crate::volume::PrimaryVolumeDescriptor;
use gpt_disk_io::BlockIo;

/// Path Table Record (type L, little-endian fields)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTableRecord {
    /// Directory identifier length
    pub dir_id_len: u8,

    /// Extended attribute record length
    pub extended_attr_len: u8,

    /// Extent location (32-bit)
    pub extent_lba: u32,

    /// Parent directory number
    pub parent_dir_num: u16,

    /// Directory identifier (0x00 for the root)
    pub dir_id: Vec<u8>,
}

impl PathTableRecord {
    /// Size of the fixed part before the identifier
    pub const FIXED_LENGTH: usize = 8;

    /// Parse one record from the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::FIXED_LENGTH {
            return Err(Iso9660Error::InvalidDirectoryRecord);
        }

        let dir_id_len = data[0];
        let id_end = Self::FIXED_LENGTH + dir_id_len as usize;
        if dir_id_len == 0 || id_end > data.len() {
            return Err(Iso9660Error::InvalidDirectoryRecord);
        }

        Ok(Self {
            dir_id_len,
            extended_attr_len: data[1],
            extent_lba: u32::from_le_bytes([data[2], data[3], data[4], data[5]]),
            parent_dir_num: u16::from_le_bytes([data[6], data[7]]),
            dir_id: data[Self::FIXED_LENGTH..id_end].to_vec(),
        })
    }
}

/// Read the root directory's starting sector from the path table
pub fn root_location<B: BlockIo>(
    block_io: &mut B,
    descriptor: &PrimaryVolumeDescriptor,
) -> Result<u32> {
    let sector = read_sector(block_io, descriptor.path_table_lba)?;
    let root = PathTableRecord::parse(&sector)?;

    log::debug!(
        "path table at LBA {}: root directory at LBA {}",
        descriptor.path_table_lba,
        root.extent_lba
    );

    Ok(root.extent_lba)
}
