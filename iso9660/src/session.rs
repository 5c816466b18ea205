//! Open-image session
//!
//! A [`Session`] owns at most one open image together with the descriptor and
//! tree built from it. The three are stored as one value, so a session is
//! either fully open or fully closed.

use crate::device::{self, ImageFile, SectorBuf};
use crate::directory;
use crate::error::{Iso9660Error, Result};
use crate::file;
use crate::tree::{Tree, TreeEntry};
use crate::volume::{self, PrimaryVolumeDescriptor};
use gpt_disk_io::BlockIo;
use std::path::Path;

/// Image handle plus everything decoded from it at open time
struct OpenImage<B> {
    device: B,
    descriptor: PrimaryVolumeDescriptor,
    tree: Tree,
}

impl<B: BlockIo> OpenImage<B> {
    /// Validate the image and build its tree
    ///
    /// Sub-step failures are mapped to the coarse kinds reported by `open`.
    fn load(mut device: B) -> Result<Self> {
        volume::check_signature(&mut device)?;

        let descriptor = volume::load_primary_descriptor(&mut device).map_err(|err| {
            log::debug!("loading primary volume descriptor failed: {err}");
            Iso9660Error::PrimaryVolumeDescriptor
        })?;

        let tree = directory::build_tree(&mut device, &descriptor).map_err(|err| {
            log::debug!("building directory tree failed: {err}");
            Iso9660Error::PathTable
        })?;

        log::debug!(
            "opened volume {:?}: {} files in {} directories",
            descriptor.volume_id,
            tree.file_count(),
            tree.directory_count() + 1,
        );

        Ok(Self {
            device,
            descriptor,
            tree,
        })
    }
}

/// One open ISO9660 image and its directory tree
///
/// # Example
/// ```no_run
/// use iso9660::Session;
///
/// let mut iso = Session::new();
/// iso.open("TEST.ISO")?;
/// println!("{}", iso.file_size("FOLDER2/ASSEMB.ASM")?);
/// iso.extract_file("FOLDER1/FOLDER12/CORN.PNG", "CORN.PNG")?;
/// iso.extract_all("Extracted_iso")?;
/// # Ok::<(), iso9660::Iso9660Error>(())
/// ```
pub struct Session<B = ImageFile> {
    image: Option<OpenImage<B>>,
}

impl Session<ImageFile> {
    /// Session with nothing open, for file-backed images
    pub fn new() -> Self {
        Self { image: None }
    }

    /// Open the image file at `path`, replacing whatever was open before
    ///
    /// A file that cannot be opened is `NotOpened`; see
    /// [`open_device`](Session::open_device) for the remaining failures.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.close();

        let path = path.as_ref();
        let device = ImageFile::open(path).map_err(|err| {
            log::debug!("opening {} failed: {err}", path.display());
            Iso9660Error::NotOpened
        })?;
        self.open_device(device)
    }
}

impl Default for Session<ImageFile> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BlockIo> Session<B> {
    /// Session over an already opened block device
    pub fn from_device(device: B) -> Result<Self> {
        let mut session = Self { image: None };
        session.open_device(device)?;
        Ok(session)
    }

    /// Parse `device` and build its tree, replacing whatever was open before
    ///
    /// The previous tree is dropped first. On failure nothing stays open:
    /// - `InvalidFormat`: sector 16 is unreadable
    /// - `NotIso`: sector 16 lacks the "CD001" identifier
    /// - `PrimaryVolumeDescriptor`: sector 16 is not a primary descriptor
    /// - `PathTable`: the path table or a directory extent is unreadable or corrupt
    pub fn open_device(&mut self, device: B) -> Result<()> {
        self.close();
        self.image = Some(OpenImage::load(device)?);
        Ok(())
    }

    /// Drop the open image and its tree
    pub fn close(&mut self) {
        self.image = None;
    }

    /// Whether an image is open
    pub fn is_open(&self) -> bool {
        self.image.is_some()
    }

    /// Primary volume descriptor of the open image
    pub fn descriptor(&self) -> Option<&PrimaryVolumeDescriptor> {
        self.image.as_ref().map(|image| &image.descriptor)
    }

    /// Directory tree of the open image
    pub fn tree(&self) -> Option<&Tree> {
        self.image.as_ref().map(|image| &image.tree)
    }

    /// Read one raw sector of the open image
    pub fn read_sector(&mut self, sector: u32) -> Result<SectorBuf> {
        let image = self.image.as_mut().ok_or(Iso9660Error::NotOpened)?;
        device::read_sector(&mut image.device, sector)
    }

    /// Look up an entry; `None` when nothing is open or the path does not resolve
    pub fn resolve(&self, path: &str) -> Option<&TreeEntry> {
        self.tree()?.resolve(path)
    }

    /// Byte offset of the entry's data within the image
    pub fn file_location(&self, path: &str) -> Result<u64> {
        Ok(self.lookup(path)?.byte_offset())
    }

    /// Size of the entry in bytes
    pub fn file_size(&self, path: &str) -> Result<u32> {
        Ok(self.lookup(path)?.size())
    }

    /// Read a whole file into memory
    pub fn read_file(&mut self, path: &str) -> Result<Vec<u8>> {
        let OpenImage { device, tree, .. } = self.image.as_mut().ok_or(Iso9660Error::NotOpened)?;
        let entry = tree.resolve(path).ok_or(Iso9660Error::NotFound)?;
        if !entry.is_file() {
            return Err(Iso9660Error::NotFound);
        }
        file::read_file_vec(device, entry)
    }

    /// Extract the file at `path` to `destination`
    pub fn extract_file<P: AsRef<Path>>(&mut self, path: &str, destination: P) -> Result<()> {
        let OpenImage { device, tree, .. } = self.image.as_mut().ok_or(Iso9660Error::NotOpened)?;
        let entry = tree.resolve(path).ok_or(Iso9660Error::NotFound)?;
        file::extract_file(device, entry, destination.as_ref())
    }

    /// Extract the whole tree below `destination_root`
    pub fn extract_all<P: AsRef<Path>>(&mut self, destination_root: P) -> Result<()> {
        let OpenImage { device, tree, .. } = self.image.as_mut().ok_or(Iso9660Error::NotOpened)?;
        file::extract_all(device, tree, destination_root.as_ref())
    }

    fn lookup(&self, path: &str) -> Result<&TreeEntry> {
        let tree = self.tree().ok_or(Iso9660Error::NotOpened)?;
        tree.resolve(path).ok_or(Iso9660Error::NotFound)
    }
}
