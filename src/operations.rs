//! Filesystem operation abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that lifecycle phases can be
//! unit-tested without touching the real filesystem.  Production code uses
//! [`SystemFileSystemOps`]; tests use `MockFileSystemOps`.

use std::io;
use std::path::Path;

/// Abstraction over the filesystem capabilities the bootstrapper needs.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create `path` and any missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copy the file at `src` to `dest`, overwriting `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if `src` cannot be read or `dest` cannot be written.
    fn copy(&self, src: &Path, dest: &Path) -> io::Result<()>;

    /// Replace the contents of `path` with `contents`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Mark `path` as executable (`0o755`).  No-op on non-Unix platforms.
    ///
    /// # Errors
    ///
    /// Returns an error if the permissions cannot be read or changed.
    fn set_executable(&self, path: &Path) -> io::Result<()>;

    /// Returns `true` if every execute bit of `path` is set.  Always `true`
    /// on non-Unix platforms.
    fn is_executable(&self, path: &Path) -> bool;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn copy(&self, src: &Path, dest: &Path) -> io::Result<()> {
        std::fs::copy(src, dest).map(|_| ())
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    #[cfg(unix)]
    fn set_executable(&self, path: &Path) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)
    }

    #[cfg(not(unix))]
    fn set_executable(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    #[cfg(unix)]
    fn is_executable(&self, path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).is_ok_and(|m| m.permissions().mode() & 0o111 == 0o111)
    }

    #[cfg(not(unix))]
    fn is_executable(&self, _path: &Path) -> bool {
        true
    }
}

/// In-memory [`FileSystemOps`] for unit tests.
///
/// Pre-configure files and directories with the builder-style methods, then
/// inspect [`copies`](Self::copies) to see which copy calls were issued.
///
/// # Example
///
/// ```ignore
/// let fs = MockFileSystemOps::new()
///     .with_file("/pkg/templates/husky/pre-commit", "npx commitlint")
///     .with_dir("/proj/.husky");
/// ```
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    files: std::sync::Mutex<std::collections::HashMap<std::path::PathBuf, String>>,
    dirs: std::sync::Mutex<std::collections::HashSet<std::path::PathBuf>>,
    copies: std::sync::Mutex<Vec<(std::path::PathBuf, std::path::PathBuf)>>,
    executables: std::sync::Mutex<Vec<std::path::PathBuf>>,
    failing: std::collections::HashSet<std::path::PathBuf>,
    failing_chmod: std::collections::HashSet<std::path::PathBuf>,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl MockFileSystemOps {
    /// Create an empty mock with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with `contents`; its ancestors are created as directories.
    #[must_use]
    pub fn with_file(self, path: impl Into<std::path::PathBuf>, contents: &str) -> Self {
        let p = path.into();
        if let Some(parent) = p.parent() {
            self.insert_dirs(parent);
        }
        self.files
            .lock()
            .expect("mock files poisoned")
            .insert(p, contents.to_string());
        self
    }

    /// Add a directory (and its ancestors).
    #[must_use]
    pub fn with_dir(self, path: impl Into<std::path::PathBuf>) -> Self {
        self.insert_dirs(&path.into());
        self
    }

    /// Make every write to `path` (copy destination, directory creation,
    /// or file write) fail with `PermissionDenied`.
    #[must_use]
    pub fn with_failing(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }

    /// Add an executable file with `contents`, as if already chmod'ed.
    #[must_use]
    pub fn with_executable(self, path: impl Into<std::path::PathBuf>, contents: &str) -> Self {
        let p = path.into();
        let fs = self.with_file(p.clone(), contents);
        fs.executables
            .lock()
            .expect("mock executables poisoned")
            .push(p);
        fs
    }

    /// Make `set_executable` on `path` fail with `PermissionDenied`.
    #[must_use]
    pub fn with_failing_chmod(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.failing_chmod.insert(path.into());
        self
    }

    /// `(src, dest)` pairs of every successful copy, in call order.
    pub fn copies(&self) -> Vec<(std::path::PathBuf, std::path::PathBuf)> {
        self.copies.lock().expect("mock copies poisoned").clone()
    }

    /// Paths marked executable, in call order.
    pub fn executables(&self) -> Vec<std::path::PathBuf> {
        self.executables
            .lock()
            .expect("mock executables poisoned")
            .clone()
    }

    /// Current contents of the file at `path`, if any.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .expect("mock files poisoned")
            .get(path.as_ref())
            .cloned()
    }

    fn insert_dirs(&self, path: &Path) {
        let mut dirs = self.dirs.lock().expect("mock dirs poisoned");
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        if self.failing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        let parent_exists = path.parent().is_none_or(|parent| {
            parent.as_os_str().is_empty()
                || self
                    .dirs
                    .lock()
                    .expect("mock dirs poisoned")
                    .contains(parent)
        });
        if parent_exists {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                "parent directory missing",
            ))
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .expect("mock files poisoned")
            .contains_key(path)
            || self.dirs.lock().expect("mock dirs poisoned").contains(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.contents(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if self.failing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        self.insert_dirs(path);
        Ok(())
    }

    fn copy(&self, src: &Path, dest: &Path) -> io::Result<()> {
        let contents = self.read_to_string(src)?;
        self.check_writable(dest)?;
        self.files
            .lock()
            .expect("mock files poisoned")
            .insert(dest.to_path_buf(), contents);
        self.copies
            .lock()
            .expect("mock copies poisoned")
            .push((src.to_path_buf(), dest.to_path_buf()));
        Ok(())
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.check_writable(path)?;
        self.files
            .lock()
            .expect("mock files poisoned")
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn set_executable(&self, path: &Path) -> io::Result<()> {
        if !self.exists(path) {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        if self.failing_chmod.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        self.executables
            .lock()
            .expect("mock executables poisoned")
            .push(path.to_path_buf());
        Ok(())
    }

    fn is_executable(&self, path: &Path) -> bool {
        self.executables
            .lock()
            .expect("mock executables poisoned")
            .iter()
            .any(|p| p == path)
    }
}
