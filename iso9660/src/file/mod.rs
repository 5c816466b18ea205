//! File reading and extraction
//!
//! File payloads are streamed sector by sector from the image into host files.
//! Nothing is rolled back on failure: whatever was written before an error
//! stays on disk.

pub mod extent;
pub mod reader;

use crate::error::{Iso9660Error, Result};
use crate::tree::{EntryKind, Tree, TreeEntry};
use crate::types::SECTOR_SIZE;
use gpt_disk_io::BlockIo;
use reader::ExtentReader;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Stream `entry`'s bytes into `out`
///
/// Returns the number of bytes written, always the entry's size on success.
pub fn copy_entry<B: BlockIo, W: Write>(
    block_io: &mut B,
    entry: &TreeEntry,
    out: &mut W,
) -> Result<u64> {
    let mut reader = ExtentReader::new(block_io, entry.extent());
    let mut buffer = [0u8; SECTOR_SIZE];
    let mut written = 0u64;

    loop {
        let n = reader.read_chunk(&mut buffer)?;
        if n == 0 {
            break;
        }
        out.write_all(&buffer[..n]).map_err(|err| {
            log::debug!("writing {:?} failed: {err}", entry.name());
            Iso9660Error::CantCreate
        })?;
        written += n as u64;
    }

    Ok(written)
}

/// Read a whole file into memory
pub fn read_file_vec<B: BlockIo>(block_io: &mut B, entry: &TreeEntry) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(entry.size() as usize);
    let mut reader = ExtentReader::new(block_io, entry.extent());
    let mut chunk = [0u8; SECTOR_SIZE];

    loop {
        let n = reader.read_chunk(&mut chunk)?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }

    Ok(buffer)
}

/// Extract one file entry to `destination`, creating or truncating it
///
/// Directory entries are refused with `NotFound`: only files have a payload
/// to extract.
pub fn extract_file<B: BlockIo>(
    block_io: &mut B,
    entry: &TreeEntry,
    destination: &Path,
) -> Result<()> {
    if !entry.is_file() {
        return Err(Iso9660Error::NotFound);
    }

    let mut output = File::create(destination).map_err(|err| {
        log::debug!("creating {} failed: {err}", destination.display());
        Iso9660Error::CantCreate
    })?;

    copy_entry(block_io, entry, &mut output)?;
    output.flush().map_err(|_| Iso9660Error::CantCreate)?;
    Ok(())
}

/// Mirror the whole tree below `destination_root`
///
/// The root directory is created if missing. The first creation failure stops
/// the traversal.
pub fn extract_all<B: BlockIo>(
    block_io: &mut B,
    tree: &Tree,
    destination_root: &Path,
) -> Result<()> {
    create_dir(destination_root)?;
    extract_entries(block_io, tree.entries(), destination_root)
}

fn extract_entries<B: BlockIo>(block_io: &mut B, entries: &[TreeEntry], dir: &Path) -> Result<()> {
    for entry in entries {
        if !is_safe_component(entry.name()) {
            log::warn!("refusing to extract entry named {:?}", entry.name());
            return Err(Iso9660Error::CantCreate);
        }

        let target = dir.join(entry.name());
        log::info!("Extracting {}", target.display());

        match entry.kind() {
            EntryKind::Directory(children) => {
                create_dir(&target)?;
                extract_entries(block_io, children, &target)?;
            }
            EntryKind::File => extract_file(block_io, entry, &target)?,
        }
    }
    Ok(())
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|err| {
        log::debug!("creating directory {} failed: {err}", path.display());
        Iso9660Error::CantCreate
    })
}

/// A name that joins onto a host directory as exactly one new component
fn is_safe_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
