//! In-memory directory tree
//!
//! Built once when an image is opened and queried afterwards without touching
//! the image again. Directories own their children; dropping the [`Tree`]
//! releases every entry.

use crate::file::extent::Extent;
use crate::path;
use core::fmt;

/// What a [`TreeEntry`] is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory with its children in on-disk order (possibly empty)
    Directory(Vec<TreeEntry>),
}

/// One file or directory of the image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    name: String,
    location: u32,
    size: u32,
    kind: EntryKind,
}

impl TreeEntry {
    /// File entry; `name` should already have its version suffix stripped
    pub fn file(name: impl Into<String>, location: u32, size: u32) -> Self {
        Self {
            name: name.into(),
            location,
            size,
            kind: EntryKind::File,
        }
    }

    /// Directory entry owning `children`
    pub fn directory(
        name: impl Into<String>,
        location: u32,
        size: u32,
        children: Vec<TreeEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            size,
            kind: EntryKind::Directory(children),
        }
    }

    /// Name as stored on disc, minus the `;1` suffix for files
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First sector of the extent
    pub fn location(&self) -> u32 {
        self.location
    }

    /// Data length in bytes
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Byte offset of the extent within the image
    pub fn byte_offset(&self) -> u64 {
        self.extent().byte_offset()
    }

    /// Extent covering this entry's data
    pub fn extent(&self) -> Extent {
        Extent::new(self.location, self.size)
    }

    /// Entry kind
    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    /// Is this a regular file?
    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory(_))
    }

    /// Children of a directory; empty for files
    pub fn children(&self) -> &[TreeEntry] {
        match &self.kind {
            EntryKind::Directory(children) => children,
            EntryKind::File => &[],
        }
    }

    /// Get file extension
    pub fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

/// Directory tree of an opened image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Wrap the root directory's children
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    /// Children of the root directory
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Look up an entry by slash-separated path (see [`path::normalize_path`])
    pub fn resolve(&self, lookup_path: &str) -> Option<&TreeEntry> {
        path::resolve(&self.entries, lookup_path)
    }

    /// Depth-first walk yielding `(path, entry)` pairs, parents before children
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(String::new(), self.entries.iter())],
        }
    }

    /// Number of files in the whole tree
    pub fn file_count(&self) -> usize {
        self.walk().filter(|(_, entry)| entry.is_file()).count()
    }

    /// Number of directories in the whole tree, root excluded
    pub fn directory_count(&self) -> usize {
        self.walk().filter(|(_, entry)| entry.is_directory()).count()
    }
}

/// Iterator returned by [`Tree::walk`]
pub struct Walk<'a> {
    stack: Vec<(String, core::slice::Iter<'a, TreeEntry>)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (String, &'a TreeEntry);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (prefix, iter) = self.stack.last_mut()?;
            let Some(entry) = iter.next() else {
                self.stack.pop();
                continue;
            };

            let path = if prefix.is_empty() {
                entry.name.clone()
            } else {
                format!("{prefix}/{}", entry.name)
            };
            if let EntryKind::Directory(children) = &entry.kind {
                self.stack.push((path.clone(), children.iter()));
            }
            return Some((path, entry));
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_level(
            f: &mut fmt::Formatter<'_>,
            entries: &[TreeEntry],
            depth: usize,
        ) -> fmt::Result {
            for entry in entries {
                match &entry.kind {
                    EntryKind::Directory(children) => {
                        writeln!(f, "{:indent$}{}/", "", entry.name, indent = depth * 2)?;
                        write_level(f, children, depth + 1)?;
                    }
                    EntryKind::File => {
                        writeln!(
                            f,
                            "{:indent$}{} ({} bytes @ LBA {})",
                            "",
                            entry.name,
                            entry.size,
                            entry.location,
                            indent = depth * 2
                        )?;
                    }
                }
            }
            Ok(())
        }

        write_level(f, &self.entries, 0)
    }
}
