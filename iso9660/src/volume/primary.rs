//! Primary Volume Descriptor parsing
//!
//! The Primary Volume Descriptor (PVD) is always present and describes
//! the basic ISO9660 filesystem structure.

use crate::directory::record::DirectoryRecord;
use crate::error::{Iso9660Error, Result};
use crate::file::extent::Extent;
use crate::types::{VolumeDescriptorType, SECTOR_SIZE, STANDARD_IDENTIFIER};
use crate::utils::{array_at, datetime::DateTime17, string};

// Byte offsets within the descriptor sector (ECMA-119 8.4)
const SYSTEM_ID: usize = 8;
const VOLUME_ID: usize = 40;
const VOLUME_SPACE_SIZE: usize = 80;
const VOLUME_SET_SIZE: usize = 120;
const VOLUME_SEQUENCE_NUMBER: usize = 124;
const LOGICAL_BLOCK_SIZE: usize = 128;
const PATH_TABLE_SIZE: usize = 132;
const TYPE_L_PATH_TABLE: usize = 140;
const OPTIONAL_TYPE_L_PATH_TABLE: usize = 144;
const ROOT_DIRECTORY_RECORD: usize = 156;
const CREATION_DATE: usize = 813;
const MODIFICATION_DATE: usize = 830;
const FILE_STRUCTURE_VERSION: usize = 881;

/// Both-endian 32-bit value (stored as LE then BE)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BothEndian32 {
    /// Little-endian value
    pub le: [u8; 4],
    /// Big-endian value
    pub be: [u8; 4],
}

impl BothEndian32 {
    /// Split an 8-byte on-disk field
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self {
            le: [bytes[0], bytes[1], bytes[2], bytes[3]],
            be: [bytes[4], bytes[5], bytes[6], bytes[7]],
        }
    }

    /// Get value (uses little-endian, the big-endian copy is never trusted)
    pub fn get(&self) -> u32 {
        u32::from_le_bytes(self.le)
    }
}

/// Both-endian 16-bit value (stored as LE then BE)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BothEndian16 {
    /// Little-endian value
    pub le: [u8; 2],
    /// Big-endian value
    pub be: [u8; 2],
}

impl BothEndian16 {
    /// Split a 4-byte on-disk field
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            le: [bytes[0], bytes[1]],
            be: [bytes[2], bytes[3]],
        }
    }

    /// Get value (uses little-endian)
    pub fn get(&self) -> u16 {
        u16::from_le_bytes(self.le)
    }
}

/// Primary Volume Descriptor (sector 16, type 1)
///
/// See ECMA-119 8.4 for full specification. Only the fields this crate
/// needs, or that are useful for diagnostics, are decoded.
#[derive(Debug, Clone)]
pub struct PrimaryVolumeDescriptor {
    /// Descriptor version (1 on conforming images)
    pub version: u8,

    /// System identifier, trailing spaces trimmed
    pub system_id: String,

    /// Volume identifier, trailing spaces trimmed
    pub volume_id: String,

    /// Volume space size in logical blocks
    pub volume_space_size: u32,

    /// Number of volumes in the set
    pub volume_set_size: u16,

    /// Index of this volume in the set
    pub volume_sequence_number: u16,

    /// Logical block size (usually 2048)
    pub logical_block_size: u16,

    /// Path table size in bytes
    pub path_table_size: u32,

    /// Type L path table location (LBA)
    pub path_table_lba: u32,

    /// Optional type L path table location (LBA, 0 if absent)
    pub optional_path_table_lba: u32,

    /// Extent of the root directory, from the embedded root record
    pub root_directory: Extent,

    /// Volume creation time
    pub created: Option<DateTime17>,

    /// Last modification time
    pub modified: Option<DateTime17>,

    /// File structure version
    pub file_structure_version: u8,
}

/// Parse Primary Volume Descriptor from sector data
///
/// Fails with `InvalidFormat` unless the sector carries the standard
/// identifier and the primary type code.
pub fn parse(data: &[u8]) -> Result<PrimaryVolumeDescriptor> {
    if data.len() < SECTOR_SIZE {
        return Err(Iso9660Error::InvalidFormat);
    }

    if &data[1..6] != STANDARD_IDENTIFIER {
        return Err(Iso9660Error::InvalidFormat);
    }

    if VolumeDescriptorType::from_code(data[0]) != Some(VolumeDescriptorType::Primary) {
        return Err(Iso9660Error::InvalidFormat);
    }

    let root = DirectoryRecord::parse(&data[ROOT_DIRECTORY_RECORD..ROOT_DIRECTORY_RECORD + 34])
        .map_err(|_| Iso9660Error::InvalidFormat)?;

    Ok(PrimaryVolumeDescriptor {
        version: data[6],
        system_id: string::achars_to_string(&data[SYSTEM_ID..SYSTEM_ID + 32]),
        volume_id: string::achars_to_string(&data[VOLUME_ID..VOLUME_ID + 32]),
        volume_space_size: BothEndian32::from_bytes(array_at(data, VOLUME_SPACE_SIZE)).get(),
        volume_set_size: BothEndian16::from_bytes(array_at(data, VOLUME_SET_SIZE)).get(),
        volume_sequence_number: BothEndian16::from_bytes(array_at(data, VOLUME_SEQUENCE_NUMBER))
            .get(),
        logical_block_size: BothEndian16::from_bytes(array_at(data, LOGICAL_BLOCK_SIZE)).get(),
        path_table_size: BothEndian32::from_bytes(array_at(data, PATH_TABLE_SIZE)).get(),
        path_table_lba: u32::from_le_bytes(array_at(data, TYPE_L_PATH_TABLE)),
        optional_path_table_lba: u32::from_le_bytes(array_at(data, OPTIONAL_TYPE_L_PATH_TABLE)),
        root_directory: Extent::new(root.get_extent_lba(), root.get_data_length()),
        created: DateTime17::from_bytes(&array_at(data, CREATION_DATE)),
        modified: DateTime17::from_bytes(&array_at(data, MODIFICATION_DATE)),
        file_structure_version: data[FILE_STRUCTURE_VERSION],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pvd_sector() -> Vec<u8> {
        let mut data = vec![0u8; SECTOR_SIZE];
        data[0] = 1;
        data[1..6].copy_from_slice(b"CD001");
        data[6] = 1;
        data[SYSTEM_ID..SYSTEM_ID + 32].fill(b' ');
        data[SYSTEM_ID..SYSTEM_ID + 5].copy_from_slice(b"LINUX");
        data[VOLUME_ID..VOLUME_ID + 32].fill(b' ');
        data[VOLUME_ID..VOLUME_ID + 7].copy_from_slice(b"TESTVOL");
        data[VOLUME_SPACE_SIZE..VOLUME_SPACE_SIZE + 4].copy_from_slice(&64u32.to_le_bytes());
        // Big-endian copy deliberately disagrees
        data[VOLUME_SPACE_SIZE + 4..VOLUME_SPACE_SIZE + 8].copy_from_slice(&99u32.to_be_bytes());
        data[LOGICAL_BLOCK_SIZE..LOGICAL_BLOCK_SIZE + 2].copy_from_slice(&2048u16.to_le_bytes());
        data[TYPE_L_PATH_TABLE..TYPE_L_PATH_TABLE + 4].copy_from_slice(&19u32.to_le_bytes());

        let root = ROOT_DIRECTORY_RECORD;
        data[root] = 34;
        data[root + 2..root + 6].copy_from_slice(&20u32.to_le_bytes());
        data[root + 10..root + 14].copy_from_slice(&2048u32.to_le_bytes());
        data[root + 25] = 0x02;
        data[root + 32] = 1;

        data[CREATION_DATE..CREATION_DATE + 16].copy_from_slice(b"2014012200000000");
        data
    }

    #[test]
    fn test_parse_fields() {
        let pvd = parse(&pvd_sector()).expect("valid descriptor");
        assert_eq!(pvd.system_id, "LINUX");
        assert_eq!(pvd.volume_id, "TESTVOL");
        assert_eq!(pvd.volume_space_size, 64);
        assert_eq!(pvd.logical_block_size, 2048);
        assert_eq!(pvd.path_table_lba, 19);
        assert_eq!(pvd.root_directory.lba, 20);
        assert_eq!(pvd.root_directory.length, 2048);
        assert_eq!(pvd.created.map(|d| d.year), Some(2014));
        assert_eq!(pvd.modified, None);
    }

    #[test]
    fn test_wrong_type_is_invalid_format() {
        let mut data = pvd_sector();
        data[0] = 2;
        assert_eq!(parse(&data).unwrap_err(), Iso9660Error::InvalidFormat);
    }

    #[test]
    fn test_wrong_magic_is_invalid_format() {
        let mut data = pvd_sector();
        data[1..6].copy_from_slice(b"CD002");
        assert_eq!(parse(&data).unwrap_err(), Iso9660Error::InvalidFormat);
    }

    #[test]
    fn test_short_buffer() {
        assert_eq!(parse(&[1u8; 100]).unwrap_err(), Iso9660Error::InvalidFormat);
    }
}
