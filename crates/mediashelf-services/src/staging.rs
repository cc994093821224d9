//! Files selected locally but not uploaded yet

use mediashelf_core::{CandidateFile, CandidateId};

/// Holds the current selection. A new accepted selection replaces it
/// wholesale; nothing accumulates across selections.
#[derive(Debug, Default)]
pub struct StagingState {
    files: Vec<CandidateFile>,
}

impl StagingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current selection with an accepted batch
    pub fn replace(&mut self, batch: Vec<CandidateFile>) {
        self.files = batch;
    }

    /// Remove one candidate by identity. Returns false (and changes nothing)
    /// if it is not staged.
    pub fn remove(&mut self, id: CandidateId) -> bool {
        match self.files.iter().position(|f| f.id() == id) {
            Some(index) => {
                self.files.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop the given candidates, keeping anything staged since
    pub fn discard(&mut self, ids: &[CandidateId]) -> usize {
        let before = self.files.len();
        self.files.retain(|f| !ids.contains(&f.id()));
        before - self.files.len()
    }

    pub fn files(&self) -> &[CandidateFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes()).sum()
    }
}
