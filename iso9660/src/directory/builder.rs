//! Recursive directory tree construction
//!
//! Every directory extent is decoded record by record. The first two records
//! ("." and "..") are dropped, files lose their `;1` suffix, and directories
//! are built in full before their parent continues.

use crate::device::{read_sector, SectorBuf};
use crate::directory::record::DirectoryRecord;
use crate::error::{Iso9660Error, Result};
use crate::file::extent::Extent;
use crate::tree::TreeEntry;
use crate::types::MAX_DIRECTORY_DEPTH;
use crate::utils::sector::SectorBudget;
use crate::utils::string;
use gpt_disk_io::BlockIo;

/// Records every directory starts with: itself and its parent
const STRUCTURAL_RECORDS: usize = 2;

/// Builds [`TreeEntry`] hierarchies from directory extents
pub struct TreeBuilder<'a, B: BlockIo> {
    block_io: &'a mut B,
}

impl<'a, B: BlockIo> TreeBuilder<'a, B> {
    /// Create a builder reading from `block_io`
    pub fn new(block_io: &'a mut B) -> Self {
        Self { block_io }
    }

    /// Build the children of the directory whose extent starts at `start_sector`
    pub fn build_directory(&mut self, start_sector: u32) -> Result<Vec<TreeEntry>> {
        self.build_at_depth(start_sector, 0)
    }

    fn build_at_depth(&mut self, start_sector: u32, depth: usize) -> Result<Vec<TreeEntry>> {
        if depth >= MAX_DIRECTORY_DEPTH {
            log::debug!("directory at LBA {start_sector} nested deeper than {MAX_DIRECTORY_DEPTH}");
            return Err(Iso9660Error::InvalidDirectoryRecord);
        }

        log::debug!("directory record at LBA {start_sector}");

        let records = self.read_records(start_sector)?;
        if !records.iter().take(STRUCTURAL_RECORDS).all(DirectoryRecord::is_self_or_parent) {
            log::warn!("directory at LBA {start_sector} does not start with \".\" and \"..\"");
        }
        let mut children = Vec::with_capacity(records.len().saturating_sub(STRUCTURAL_RECORDS));

        for record in records.into_iter().skip(STRUCTURAL_RECORDS) {
            let name = string::identifier_to_string(record.file_identifier());
            let location = record.get_extent_lba();
            let size = record.get_data_length();

            let entry = if record.is_directory() {
                let nested = self.build_at_depth(location, depth + 1)?;
                TreeEntry::directory(name, location, size, nested)
            } else {
                TreeEntry::file(string::strip_version(&name), location, size)
            };
            children.push(entry);
        }

        Ok(children)
    }

    /// Decode all records of one directory extent, in on-disk order.
    ///
    /// The extent size comes from the directory's own "." record. A zero
    /// length byte, or too little room left for another record, ends the
    /// current sector; decoding resumes at the next sector until the extent
    /// is exhausted.
    fn read_records(&mut self, start_sector: u32) -> Result<Vec<DirectoryRecord>> {
        let mut records = Vec::new();
        let mut extent_sectors = 1u32;
        let mut sector_index = 0u32;
        let mut sector = self.read_extent_sector(start_sector, sector_index)?;
        let mut budget = SectorBudget::new();

        loop {
            if !budget.fits_record(DirectoryRecord::MIN_LENGTH) || sector[budget.offset()] == 0 {
                budget.pad_to_boundary();
                sector_index += 1;
                if sector_index >= extent_sectors {
                    break;
                }
                sector = self.read_extent_sector(start_sector, sector_index)?;
                continue;
            }

            let record = DirectoryRecord::parse(&sector[budget.offset()..])?;
            log::trace!(
                "  entry {:?} lba {} size {} flags {:#04x} record len {}",
                String::from_utf8_lossy(record.file_identifier()),
                record.get_extent_lba(),
                record.get_data_length(),
                record.file_flags,
                record.length,
            );

            if records.is_empty() {
                extent_sectors = Extent::new(start_sector, record.get_data_length())
                    .sector_count()
                    .max(1);
            }
            budget.consume(record.length as usize);
            records.push(record);
        }

        Ok(records)
    }

    fn read_extent_sector(&mut self, start_sector: u32, index: u32) -> Result<SectorBuf> {
        let sector = start_sector
            .checked_add(index)
            .ok_or(Iso9660Error::InvalidOffset)?;
        read_sector(&mut *self.block_io, sector)
    }
}
