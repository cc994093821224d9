//! Local mirror of the remote listing
//!
//! Read-through only: the only write is a wholesale `replace` with a fresh
//! listing. There is no local insert or delete.

use std::collections::HashSet;

use mediashelf_core::{FileId, StoredFile};

#[derive(Debug, Default)]
pub struct GalleryState {
    files: Vec<StoredFile>,
    /// Number of snapshots applied so far
    version: u64,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current snapshot and install `files`. Ids are kept
    /// unique; a repeated id keeps its first occurrence.
    pub fn replace(&mut self, files: Vec<StoredFile>) {
        let mut seen = HashSet::with_capacity(files.len());
        let mut unique = Vec::with_capacity(files.len());

        for file in files {
            if seen.insert(file.id.clone()) {
                unique.push(file);
            } else {
                tracing::warn!(id = %file.id, "Duplicate id in listing, keeping first entry");
            }
        }

        self.files = unique;
        self.version += 1;
    }

    pub fn files(&self) -> &[StoredFile] {
        &self.files
    }

    pub fn get(&self, id: &FileId) -> Option<&StoredFile> {
        self.files.iter().find(|f| &f.id == id)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
