//! Virtual filesystem model
//!
//! A [`VirtualFileSystem`] is built once per run, handed whole to the renderer
//! and then dropped.

use std::borrow::Cow;
use std::collections::HashMap;

/// Forward-slash path relative to the scanned root
pub type RelativePath = String;

/// What is known about a file's body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Raw bytes, read from disk
    Bytes(Vec<u8>),
    /// Path only; the format renders a reference instead of the body
    Reference,
}

/// A matched file and (optionally) its content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: RelativePath,
    pub content: Content,
}

impl FileEntry {
    pub fn with_bytes(path: impl Into<RelativePath>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content: Content::Bytes(bytes),
        }
    }

    pub fn reference(path: impl Into<RelativePath>) -> Self {
        Self {
            path: path.into(),
            content: Content::Reference,
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.content {
            Content::Bytes(bytes) => Some(bytes.as_slice()),
            Content::Reference => None,
        }
    }

    /// Content decoded as UTF-8, invalid sequences replaced
    pub fn text(&self) -> Option<Cow<'_, str>> {
        self.bytes().map(String::from_utf8_lossy)
    }
}

/// Ordered mapping from relative path to content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualFileSystem {
    entries: Vec<FileEntry>,
    index: HashMap<RelativePath, usize>,
}

impl VirtualFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; a repeated path replaces the earlier entry in place
    pub fn insert(&mut self, entry: FileEntry) {
        match self.index.get(&entry.path) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(entry.path.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entry(path).and_then(FileEntry::bytes)
    }

    pub fn get_text(&self, path: &str) -> Option<Cow<'_, str>> {
        self.entry(path).and_then(FileEntry::text)
    }

    pub fn entry(&self, path: &str) -> Option<&FileEntry> {
        self.index.get(path).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entry(path).is_some()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<FileEntry> for VirtualFileSystem {
    fn from_iter<I: IntoIterator<Item = FileEntry>>(iter: I) -> Self {
        let mut vfs = VirtualFileSystem::new();
        for entry in iter {
            vfs.insert(entry);
        }
        vfs
    }
}

impl<'a> IntoIterator for &'a VirtualFileSystem {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
