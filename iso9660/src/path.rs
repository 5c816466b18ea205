//! Lookup path normalization and resolution
//!
//! Callers pass host-style paths (`folder1\file.txt`, `VeryLongName/a.txt`).
//! They are mapped onto Level 1 style identifiers before being matched
//! against the tree.

use crate::tree::{EntryKind, TreeEntry};

/// Longest directory identifier kept as-is during normalization
pub const MAX_DIRECTORY_NAME: usize = 8;

/// Characters kept from an over-long directory identifier
const TRUNCATED_PREFIX: usize = 6;

/// Marker appended to a truncated directory identifier
const TRUNCATION_MARKER: &str = "~0";

/// Make a lookup path ISO9660 compatible.
///
/// - ASCII lowercase letters become uppercase.
/// - `\` separators become `/`.
/// - Every directory component (one followed by `/`) longer than
///   [`MAX_DIRECTORY_NAME`] characters becomes its first 6 characters plus
///   `~0`. The final component is left alone.
///
/// The truncation always uses `~0`, never a counter, so two long names with
/// the same 6-character prefix normalize to the same component and the first
/// one on disc wins. Normalizing an already normalized path returns it
/// unchanged.
pub fn normalize_path(path: &str) -> String {
    let unified: String = path
        .chars()
        .map(|c| if c == '\\' { '/' } else { c.to_ascii_uppercase() })
        .collect();

    let components: Vec<&str> = unified.split('/').collect();
    let last = components.len() - 1;

    components
        .iter()
        .enumerate()
        .map(|(i, component)| {
            if i < last && component.chars().count() > MAX_DIRECTORY_NAME {
                let mut short: String = component.chars().take(TRUNCATED_PREFIX).collect();
                short.push_str(TRUNCATION_MARKER);
                short
            } else {
                (*component).to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve `lookup_path` against the root level `entries`.
///
/// Components are matched exactly, after normalization, in child order; the
/// first match wins. Empty components are skipped. Returns `None` when a
/// component is missing or an intermediate component is a file.
pub fn resolve<'a>(entries: &'a [TreeEntry], lookup_path: &str) -> Option<&'a TreeEntry> {
    let normalized = normalize_path(lookup_path);
    let mut components = normalized.split('/').filter(|c| !c.is_empty()).peekable();
    let mut level = entries;

    while let Some(component) = components.next() {
        let entry = level.iter().find(|entry| entry.name() == component)?;

        if components.peek().is_none() {
            return Some(entry);
        }

        match entry.kind() {
            EntryKind::Directory(children) => level = children,
            EntryKind::File => return None,
        }
    }

    None
}
