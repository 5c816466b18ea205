//! ISO9660 Image Reader
//!
//! Reads raw ISO9660 disc images without mounting them: the directory tree is
//! decoded into memory once, then files can be looked up by path and streamed
//! out to the host filesystem.
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Device layer** - Whole-sector reads through [`gpt_disk_io::BlockIo`]
//! 2. **Volume layer** - Validates the Primary Volume Descriptor in sector 16
//! 3. **Directory layer** - Path table root lookup and recursive record decoding
//! 4. **Tree / path layer** - In-memory tree and lookup path normalization
//! 5. **File layer** - Streams extents into host files
//!
//! [`Session`] ties the layers together and is the intended entry point.
//!
//! # Usage
//!
//! ```no_run
//! use iso9660::Session;
//!
//! let mut iso = Session::new();
//! iso.open("TEST.ISO")?;
//!
//! if let Some(tree) = iso.tree() {
//!     print!("{tree}");
//! }
//!
//! // Lookups are case-insensitive and accept `\` separators
//! let offset = iso.file_location("folder1/folder12/r.png")?;
//! println!("R.PNG starts at byte {offset:#010X}");
//!
//! iso.extract_all("Extracted_iso")?;
//! # Ok::<(), iso9660::Iso9660Error>(())
//! ```
//!
//! Logging goes through the [`log`] facade; install any logger to see the
//! descriptor and directory walk at `debug` / `trace` level.

#![warn(missing_docs)]

pub mod device;
pub mod directory;
pub mod error;
pub mod file;
pub mod path;
pub mod session;
pub mod tree;
pub mod types;
pub mod utils;
pub mod volume;

pub use device::ImageFile;
pub use error::{Iso9660Error, Result};
pub use path::normalize_path;
pub use session::Session;
pub use tree::{EntryKind, Tree, TreeEntry};
pub use types::SECTOR_SIZE;
pub use volume::PrimaryVolumeDescriptor;
