//! File-backed block device
//!
//! Exposes a raw `.iso` file (or any `Read + Seek` stream) through
//! [`BlockIo`] so the rest of the crate never touches stream cursors directly.

use crate::types::SECTOR_SIZE;
use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Read-only ISO image stream with 2048-byte blocks
#[derive(Debug)]
pub struct ImageFile<T = File> {
    inner: T,
}

impl ImageFile<File> {
    /// Open an image file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<T: Read + Seek> ImageFile<T> {
    /// Wrap an already opened stream
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Give back the wrapped stream
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Seek to `offset`, run `op`, then put the cursor back where it was.
    ///
    /// The cursor is restored even when `op` fails.
    fn with_cursor_at<R>(
        &mut self,
        offset: u64,
        op: impl FnOnce(&mut T) -> io::Result<R>,
    ) -> io::Result<R> {
        let restore = self.inner.stream_position()?;
        let result = self
            .inner
            .seek(SeekFrom::Start(offset))
            .and_then(|_| op(&mut self.inner));
        self.inner.seek(SeekFrom::Start(restore))?;
        result
    }
}

impl<T: Read + Seek> BlockIo for ImageFile<T> {
    type Error = io::Error;

    fn block_size(&self) -> BlockSize {
        BlockSize::new(SECTOR_SIZE as u32).expect("2048 is a valid block size")
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        let restore = self.inner.stream_position()?;
        let len = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(restore))?;
        Ok(len / SECTOR_SIZE as u64)
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        let offset = start_lba
            .0
            .checked_mul(SECTOR_SIZE as u64)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "LBA overflows image offset")
            })?;
        self.with_cursor_at(offset, |stream| stream.read_exact(dst))
    }

    fn write_blocks(&mut self, _start_lba: Lba, _src: &[u8]) -> Result<(), Self::Error> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "ISO images are opened read-only",
        ))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
