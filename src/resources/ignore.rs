//! Ignore-rules resource: lines that must appear in the project's ignore file.
use std::path::PathBuf;

use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::FileError;
use crate::operations::FileSystemOps;

/// An ignore file (e.g. `.gitignore`) that must contain a set of entries.
///
/// Existing content is never rewritten; missing entries are appended.
#[derive(Debug, Clone)]
pub struct IgnoreFile<'a> {
    /// Ignore file path inside the project.
    pub path: PathBuf,
    /// Required entries, compared against trimmed lines.
    pub entries: Vec<String>,
    fs: &'a dyn FileSystemOps,
}

impl<'a> IgnoreFile<'a> {
    /// Create a new ignore file resource.
    #[must_use]
    pub const fn new(path: PathBuf, entries: Vec<String>, fs: &'a dyn FileSystemOps) -> Self {
        Self { path, entries, fs }
    }

    fn existing(&self) -> Result<String, FileError> {
        if !self.fs.exists(&self.path) {
            return Ok(String::new());
        }
        self.fs
            .read_to_string(&self.path)
            .map_err(|source| FileError::Ignore {
                path: self.path.clone(),
                source,
            })
    }

    /// Entries not yet present in `content`, in configured order.
    fn missing_entries<'e>(&'e self, content: &str) -> Vec<&'e str> {
        let mut missing: Vec<&str> = Vec::new();
        for entry in &self.entries {
            let entry = entry.trim();
            if entry.is_empty() || missing.contains(&entry) {
                continue;
            }
            if !content.lines().any(|line| line.trim() == entry) {
                missing.push(entry);
            }
        }
        missing
    }
}

impl Applicable for IgnoreFile<'_> {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        let content = self.existing()?;
        let missing = self.missing_entries(&content);
        if missing.is_empty() {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        let mut updated = content;
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        for entry in missing {
            updated.push_str(entry);
            updated.push('\n');
        }

        super::fs::ensure_parent_dir(self.fs, &self.path)?;
        self.fs
            .write(&self.path, &updated)
            .map_err(|source| FileError::Ignore {
                path: self.path.clone(),
                source,
            })?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for IgnoreFile<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.fs.exists(&self.path) {
            return Ok(ResourceState::Missing);
        }
        let content = self.existing()?;
        let missing = self.missing_entries(&content);
        if missing.is_empty() {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: format!("missing entries: {}", missing.join(", ")),
            })
        }
    }
}
