//! Error types for ISO9660 operations

/// Result type for ISO9660 operations
pub type Result<T> = core::result::Result<T, Iso9660Error>;

/// Errors that can occur during ISO9660 operations
///
/// The first group mirrors what [`Session::open`](crate::Session::open) and the
/// query operations report to callers. `InvalidDirectoryRecord` comes from the
/// tree builder and is folded into `PathTable` by `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Iso9660Error {
    /// No image is open, or the image file could not be opened
    #[error("No image opened")]
    NotOpened,

    /// Descriptor type mismatch or unreadable descriptor sector
    #[error("Invalid image format")]
    InvalidFormat,

    /// Sector lies outside the image
    #[error("Sector offset outside of image")]
    InvalidOffset,

    /// Volume descriptor signature is not "CD001"
    #[error("Not an ISO9660 image")]
    NotIso,

    /// Primary volume descriptor could not be loaded
    #[error("Primary volume descriptor error")]
    PrimaryVolumeDescriptor,

    /// Directory tree could not be built from the path table
    #[error("Path table error")]
    PathTable,

    /// Lookup path did not resolve
    #[error("File or directory not found")]
    NotFound,

    /// Extraction destination could not be created or written
    #[error("Cannot create extraction target")]
    CantCreate,

    /// Corrupted directory record
    #[error("Corrupted directory record")]
    InvalidDirectoryRecord,
}
