//! String handling utilities
//!
//! ISO9660 identifiers are d-characters / a-characters, padded with spaces in
//! volume descriptors.

/// Version suffix authoring tools append to file identifiers
pub const VERSION_SUFFIX: &str = ";1";

/// Trim trailing spaces from byte slice
pub fn trim_trailing_spaces(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b' ' {
        end -= 1;
    }
    &bytes[..end]
}

/// Decode a space padded a-character field (system / volume identifiers)
pub fn achars_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(trim_trailing_spaces(bytes)).into_owned()
}

/// Decode a directory record identifier, keeping on-disk characters
pub fn identifier_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Strip the `;1` version suffix from a file identifier.
///
/// Only that literal suffix is removed. Images written without it pass
/// through unchanged, so `README.TXT;1` and `README.TXT` name the same file.
pub fn strip_version(name: &str) -> &str {
    name.strip_suffix(VERSION_SUFFIX).unwrap_or(name)
}
