//! Utility functions for ISO9660 parsing

pub mod datetime;
pub mod sector;
pub mod string;

/// Copy `N` bytes starting at `offset` out of `data`.
///
/// Callers check `data` is long enough before decoding fields.
pub(crate) fn array_at<const N: usize>(data: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&data[offset..offset + N]);
    out
}
