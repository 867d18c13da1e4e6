//! Template file resource: a packaged file copied into the project.
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::FileError;
use crate::operations::FileSystemOps;

/// A template file that can be checked against and copied to its
/// destination.
///
/// Contents are compared after trimming surrounding whitespace, so a
/// destination differing only by a trailing newline counts as up to date.
/// A hook script with matching contents but missing execute bits is not.
#[derive(Debug, Clone)]
pub struct TemplateFile<'a> {
    /// Template path inside the package.
    pub source: PathBuf,
    /// Destination path inside the project.
    pub dest: PathBuf,
    /// Mark the destination executable after copying (hook scripts).
    pub executable: bool,
    fs: &'a dyn FileSystemOps,
}

impl<'a> TemplateFile<'a> {
    /// Create a plain (non-executable) template file resource.
    #[must_use]
    pub const fn new(source: PathBuf, dest: PathBuf, fs: &'a dyn FileSystemOps) -> Self {
        Self {
            source,
            dest,
            executable: false,
            fs,
        }
    }

    /// Create a hook script resource, made executable once copied.
    #[must_use]
    pub const fn hook(source: PathBuf, dest: PathBuf, fs: &'a dyn FileSystemOps) -> Self {
        Self {
            source,
            dest,
            executable: true,
            fs,
        }
    }
}

impl Applicable for TemplateFile<'_> {
    fn description(&self) -> String {
        self.dest.file_name().map_or_else(
            || self.dest.display().to_string(),
            |n| n.to_string_lossy().to_string(),
        )
    }

    fn apply(&self) -> Result<ResourceChange> {
        let copy_err = |source| FileError::Copy {
            src: self.source.clone(),
            dest: self.dest.clone(),
            source,
        };

        if let Some(parent) = self.dest.parent()
            && !parent.as_os_str().is_empty()
            && !self.fs.exists(parent)
        {
            self.fs.create_dir_all(parent).map_err(copy_err)?;
        }
        self.fs.copy(&self.source, &self.dest).map_err(copy_err)?;

        if self.executable {
            self.fs
                .set_executable(&self.dest)
                .with_context(|| format!("setting hook permissions: {}", self.dest.display()))?;
        }

        Ok(ResourceChange::Applied)
    }
}

impl Resource for TemplateFile<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.fs.exists(&self.source) {
            return Ok(ResourceState::Invalid {
                reason: format!("template does not exist: {}", self.source.display()),
            });
        }

        if !self.fs.exists(&self.dest) {
            return Ok(ResourceState::Missing);
        }

        // An unreadable side counts as differing so the copy is attempted.
        let (src, dst) = match (
            self.fs.read_to_string(&self.source),
            self.fs.read_to_string(&self.dest),
        ) {
            (Ok(src), Ok(dst)) => (src, dst),
            (Err(e), _) | (_, Err(e)) => {
                return Ok(ResourceState::Incorrect {
                    current: format!("unreadable: {e}"),
                });
            }
        };

        if src.trim() != dst.trim() {
            return Ok(ResourceState::Incorrect {
                current: "content differs".to_string(),
            });
        }
        if self.executable && !self.fs.is_executable(&self.dest) {
            return Ok(ResourceState::Incorrect {
                current: "not executable".to_string(),
            });
        }
        Ok(ResourceState::Correct)
    }
}
