//! File flags byte of a directory record (ECMA-119 9.1.6)

use crate::types::FileFlags;

const HIDDEN: u8 = 1 << 0;
const DIRECTORY: u8 = 1 << 1;
const ASSOCIATED: u8 = 1 << 2;
const RECORD_FORMAT: u8 = 1 << 3;
const PROTECTION: u8 = 1 << 4;
const MULTI_EXTENT: u8 = 1 << 7;

impl FileFlags {
    /// Decode the flags byte; reserved bits 5 and 6 are ignored
    pub fn from_byte(byte: u8) -> Self {
        let set = |bit: u8| byte & bit != 0;
        Self {
            hidden: set(HIDDEN),
            directory: set(DIRECTORY),
            associated: set(ASSOCIATED),
            extended_format: set(RECORD_FORMAT),
            extended_permissions: set(PROTECTION),
            not_final: set(MULTI_EXTENT),
        }
    }
}
