//! Directory Record structure
//!
//! Directory records describe files and subdirectories.

use crate::error::{Iso9660Error, Result};
use crate::types::FileFlags;
use crate::utils::array_at;
use crate::volume::primary::{BothEndian16, BothEndian32};

/// Directory Record (variable length), decoded from its on-disk bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    /// Length of directory record (BP 1)
    pub length: u8,

    /// Extended attribute record length (BP 2)
    pub extended_attr_length: u8,

    /// Extent location (both-endian 32-bit) (BP 3-10)
    pub extent_lba: BothEndian32,

    /// Data length (both-endian 32-bit) (BP 11-18)
    pub data_length: BothEndian32,

    /// Recording date and time (7 bytes) (BP 19-25)
    pub recording_datetime: [u8; 7],

    /// File flags (BP 26)
    pub file_flags: u8,

    /// File unit size (interleaved files) (BP 27)
    pub file_unit_size: u8,

    /// Interleave gap size (BP 28)
    pub interleave_gap: u8,

    /// Volume sequence number (both-endian 16-bit) (BP 29-32)
    pub volume_sequence: BothEndian16,

    /// File identifier length (BP 33)
    pub file_id_len: u8,

    file_id: Vec<u8>,
}

impl DirectoryRecord {
    /// Size of the fixed part, up to and including the identifier length
    pub const FIXED_LENGTH: usize = 33;

    /// Minimum record length
    pub const MIN_LENGTH: usize = 34;

    /// Parse directory record from bytes
    ///
    /// `data` starts at the record and runs to the end of its sector, so a
    /// record claiming to extend past it is rejected.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::MIN_LENGTH {
            return Err(Iso9660Error::InvalidDirectoryRecord);
        }

        let length = data[0];
        if (length as usize) < Self::MIN_LENGTH || length as usize > data.len() {
            return Err(Iso9660Error::InvalidDirectoryRecord);
        }

        let file_id_len = data[32];
        let id_end = Self::FIXED_LENGTH + file_id_len as usize;
        if file_id_len == 0 || id_end > length as usize {
            return Err(Iso9660Error::InvalidDirectoryRecord);
        }

        Ok(Self {
            length,
            extended_attr_length: data[1],
            extent_lba: BothEndian32::from_bytes(array_at(data, 2)),
            data_length: BothEndian32::from_bytes(array_at(data, 10)),
            recording_datetime: array_at(data, 18),
            file_flags: data[25],
            file_unit_size: data[26],
            interleave_gap: data[27],
            volume_sequence: BothEndian16::from_bytes(array_at(data, 28)),
            file_id_len,
            file_id: data[Self::FIXED_LENGTH..id_end].to_vec(),
        })
    }

    /// Get extent LBA (little-endian part of both-endian field)
    pub fn get_extent_lba(&self) -> u32 {
        self.extent_lba.get()
    }

    /// Get data length (little-endian part)
    pub fn get_data_length(&self) -> u32 {
        self.data_length.get()
    }

    /// Parse file flags
    pub fn get_flags(&self) -> FileFlags {
        FileFlags::from_byte(self.file_flags)
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        self.get_flags().directory
    }

    /// Get file identifier bytes
    pub fn file_identifier(&self) -> &[u8] {
        &self.file_id
    }

    /// Whether the identifier is the single-byte "." (0x00) or ".." (0x01) form
    pub fn is_self_or_parent(&self) -> bool {
        matches!(self.file_id.as_slice(), [0x00] | [0x01])
    }
}
