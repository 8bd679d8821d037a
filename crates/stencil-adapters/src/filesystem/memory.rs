//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use stencil_core::{
    application::{ApplicationError, ports::Filesystem},
    error::StencilResult,
};

/// In-memory emission sink. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    writes: usize,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// All files, sorted by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of `write_file` calls that succeeded, overwrites included.
    pub fn write_count(&self) -> usize {
        self.inner.read().map(|inner| inner.writes).unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
            inner.writes = 0;
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::FilesystemLock)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::FilesystemLock)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::EmissionFailed {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        // Insert under the write lock so a reader never sees partial text.
        inner.files.insert(path.to_path_buf(), content.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        let path = Path::new("/sln/src/DeleteOrder.cs");

        assert!(fs.write_file(path, "text").is_err());

        fs.create_dir_all(Path::new("/sln/src")).unwrap();
        fs.write_file(path, "text").unwrap();
        assert_eq!(fs.read_file(path).as_deref(), Some("text"));
        assert!(fs.exists(Path::new("/sln")));
    }

    #[test]
    fn last_write_wins() {
        let fs = MemoryFilesystem::new();
        let path = Path::new("/out/FakeOrder.cs");
        fs.create_dir_all(Path::new("/out")).unwrap();

        fs.write_file(path, "first").unwrap();
        fs.write_file(path, "second").unwrap();

        assert_eq!(fs.read_file(path).as_deref(), Some("second"));
        assert_eq!(fs.list_files(), vec![path.to_path_buf()]);
        assert_eq!(fs.write_count(), 2);
    }

    #[test]
    fn clones_share_contents() {
        let fs = MemoryFilesystem::new();
        let clone = fs.clone();
        clone.create_dir_all(Path::new("/a")).unwrap();
        clone.write_file(Path::new("/a/b.cs"), "x").unwrap();

        assert!(fs.exists(Path::new("/a/b.cs")));
        fs.clear();
        assert!(clone.list_files().is_empty());
    }
}
