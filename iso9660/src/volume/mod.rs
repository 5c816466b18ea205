//! Volume descriptor parsing
//!
//! ISO9660 volume descriptors start at sector 16 and describe the filesystem layout.
//! Only the Primary Volume Descriptor in that first slot is used here.

pub mod primary;

use crate::device::{read_sector, SectorBuf};
use crate::error::{Iso9660Error, Result};
use crate::types::{VolumeDescriptorType, STANDARD_IDENTIFIER, VOLUME_DESCRIPTOR_START};
use gpt_disk_io::BlockIo;

pub use primary::PrimaryVolumeDescriptor;

/// Volume Descriptor header (first 7 bytes of each descriptor)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeDescriptorHeader {
    /// Type code (0=boot, 1=primary, 2=supplementary, 255=terminator)
    pub type_code: u8,

    /// Standard identifier "CD001"
    pub identifier: [u8; 5],

    /// Version (always 1)
    pub version: u8,
}

impl VolumeDescriptorHeader {
    /// Read the header at the start of a descriptor sector
    pub fn parse(sector: &SectorBuf) -> Self {
        Self {
            type_code: sector[0],
            identifier: [sector[1], sector[2], sector[3], sector[4], sector[5]],
            version: sector[6],
        }
    }

    /// Check the standard identifier
    pub fn has_signature(&self) -> bool {
        &self.identifier == STANDARD_IDENTIFIER
    }

    /// Decoded type code
    pub fn descriptor_type(&self) -> Option<VolumeDescriptorType> {
        VolumeDescriptorType::from_code(self.type_code)
    }
}

/// Verify the first volume descriptor slot carries "CD001"
///
/// An unreadable sector 16 (image too short) is `InvalidFormat`; a readable
/// sector without the identifier is `NotIso`.
pub fn check_signature<B: BlockIo>(block_io: &mut B) -> Result<VolumeDescriptorHeader> {
    let sector = read_sector(block_io, VOLUME_DESCRIPTOR_START)
        .map_err(|_| Iso9660Error::InvalidFormat)?;

    let header = VolumeDescriptorHeader::parse(&sector);
    if !header.has_signature() {
        log::debug!(
            "sector {VOLUME_DESCRIPTOR_START} identifier {:02X?} is not CD001",
            header.identifier
        );
        return Err(Iso9660Error::NotIso);
    }
    Ok(header)
}

/// Load the Primary Volume Descriptor from sector 16
///
/// Any other descriptor kind in that slot is `InvalidFormat`.
pub fn load_primary_descriptor<B: BlockIo>(block_io: &mut B) -> Result<PrimaryVolumeDescriptor> {
    let sector = read_sector(block_io, VOLUME_DESCRIPTOR_START)
        .map_err(|_| Iso9660Error::InvalidFormat)?;

    let header = VolumeDescriptorHeader::parse(&sector);
    match header.descriptor_type() {
        Some(VolumeDescriptorType::Primary) => {}
        found => {
            log::debug!(
                "sector {VOLUME_DESCRIPTOR_START} holds {found:?} (type {}), not primary",
                header.type_code
            );
            return Err(Iso9660Error::InvalidFormat);
        }
    }

    let pvd = primary::parse(&sector)?;

    log::debug!(
        "primary volume descriptor: version {}, volume {:?}, {} blocks of {} bytes, \
         path table at LBA {}",
        pvd.version,
        pvd.volume_id,
        pvd.volume_space_size,
        pvd.logical_block_size,
        pvd.path_table_lba,
    );
    if let Some(created) = &pvd.created {
        log::debug!("volume created {created}");
    }

    Ok(pvd)
}
