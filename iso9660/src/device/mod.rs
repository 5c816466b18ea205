//! Sector access to the image
//!
//! Everything above this layer works in whole 2048-byte sectors addressed by
//! logical block number; the [`BlockIo`](gpt_disk_io::BlockIo) trait is the seam.

pub mod image;
pub mod sector;

pub use image::ImageFile;
pub use sector::{read_sector, read_sector_prefix, SectorBuf};
