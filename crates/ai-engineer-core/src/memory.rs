use crate::error::{EngineError, Result};
use crate::fs::{normalize, FileSystem};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// In-memory workspace for tests. Individual paths can be made to fail on
/// read, write or delete to exercise error handling.
#[derive(Debug)]
pub struct MemoryFileSystem {
    base: PathBuf,
    files: RefCell<BTreeMap<PathBuf, String>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
    failing_reads: RefCell<BTreeSet<PathBuf>>,
    failing_writes: RefCell<BTreeSet<PathBuf>>,
    failing_deletes: RefCell<BTreeSet<PathBuf>>,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self {
            base: PathBuf::from("/workspace"),
            files: RefCell::default(),
            dirs: RefCell::default(),
            failing_reads: RefCell::default(),
            failing_writes: RefCell::default(),
            failing_deletes: RefCell::default(),
        }
    }

    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let fs = Self::new();
        for (path, content) in files {
            fs.insert(path, content);
        }
        fs
    }

    pub fn insert(&self, path: &str, content: &str) {
        let key = self.key(Path::new(path));
        self.add_parents(&key);
        self.files.borrow_mut().insert(key, content.to_string());
    }

    /// Content of a file, if present.
    pub fn file(&self, path: &str) -> Option<String> {
        self.files.borrow().get(&self.key(Path::new(path))).cloned()
    }

    /// All file paths relative to the base, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.files
            .borrow()
            .keys()
            .map(|k| self.relative_path(k).to_string_lossy().into_owned())
            .collect()
    }

    pub fn fail_reads(&self, path: &str) {
        self.failing_reads.borrow_mut().insert(self.key(Path::new(path)));
    }

    pub fn fail_writes(&self, path: &str) {
        self.failing_writes.borrow_mut().insert(self.key(Path::new(path)));
    }

    pub fn fail_deletes(&self, path: &str) {
        self.failing_deletes.borrow_mut().insert(self.key(Path::new(path)));
    }

    fn key(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.base.join(path))
        }
    }

    /// Key for a port call. Paths outside the base are refused like on disk.
    fn checked(&self, path: &Path) -> Result<PathBuf> {
        if !self.is_within_base(path) {
            return Err(EngineError::OutsideWorkspace(path.to_path_buf()));
        }
        Ok(self.key(path))
    }

    fn add_parents(&self, key: &Path) {
        let mut dirs = self.dirs.borrow_mut();
        let mut current = key.parent();
        while let Some(dir) = current {
            if !dirs.insert(dir.to_path_buf()) {
                break;
            }
            current = dir.parent();
        }
    }

    fn injected(op: &'static str, key: PathBuf) -> EngineError {
        EngineError::io(
            op,
            key,
            std::io::Error::new(ErrorKind::PermissionDenied, "injected failure"),
        )
    }
}

impl FileSystem for MemoryFileSystem {
    fn base_dir(&self) -> &Path {
        &self.base
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let key = self.checked(path)?;
        Ok(self.files.borrow().contains_key(&key) || self.dirs.borrow().contains(&key))
    }

    fn read(&self, path: &Path) -> Result<String> {
        let key = self.checked(path)?;
        if self.failing_reads.borrow().contains(&key) {
            return Err(Self::injected("read", key));
        }
        self.files
            .borrow()
            .get(&key)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let key = self.checked(path)?;
        if self.failing_writes.borrow().contains(&key) {
            return Err(Self::injected("write", key));
        }
        self.add_parents(&key);
        self.files.borrow_mut().insert(key, content.to_string());
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<()> {
        let key = self.checked(path)?;
        if self.failing_deletes.borrow().contains(&key) {
            return Err(Self::injected("delete", key));
        }
        self.files.borrow_mut().remove(&key);
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        let key = self.checked(path)?;
        self.add_parents(&key);
        self.dirs.borrow_mut().insert(key);
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let key = self.checked(dir)?;
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|k| k.parent() == Some(key.as_path()))
            .filter_map(|k| k.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_delete() {
        let fs = MemoryFileSystem::new();
        fs.write(Path::new(".ai/task/task.md"), "task").unwrap();
        assert!(fs.exists(Path::new(".ai/task")).unwrap());
        assert_eq!(fs.read(Path::new(".ai/task/task.md")).unwrap(), "task");
        fs.delete(Path::new(".ai/task/task.md")).unwrap();
        assert!(!fs.exists(Path::new(".ai/task/task.md")).unwrap());
        assert!(matches!(
            fs.read(Path::new(".ai/task/task.md")),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn list_files_is_shallow() {
        let fs = MemoryFileSystem::with_files(&[("d/a.md", "a"), ("d/sub/b.md", "b")]);
        assert_eq!(fs.list_files(Path::new("d")).unwrap(), vec!["a.md"]);
        assert!(fs.list_files(Path::new("none")).unwrap().is_empty());
    }

    #[test]
    fn injected_failures() {
        let fs = MemoryFileSystem::with_files(&[("x.md", "x")]);
        fs.fail_reads("x.md");
        assert!(matches!(
            fs.read(Path::new("x.md")),
            Err(EngineError::Io { op: "read", .. })
        ));
        assert_eq!(fs.read_safe(Path::new("x.md"), "fb"), "fb");
        fs.fail_writes("y.md");
        assert!(fs.write(Path::new("y.md"), "y").is_err());
    }

    #[test]
    fn refuses_paths_outside_base() {
        let fs = MemoryFileSystem::new();
        for path in ["../escape.md", "/etc/passwd", ".ai/../../up.md"] {
            let path = Path::new(path);
            assert!(matches!(
                fs.write(path, "x"),
                Err(EngineError::OutsideWorkspace(_))
            ));
            assert!(matches!(fs.exists(path), Err(EngineError::OutsideWorkspace(_))));
            assert!(matches!(fs.read(path), Err(EngineError::OutsideWorkspace(_))));
            assert!(matches!(fs.delete(path), Err(EngineError::OutsideWorkspace(_))));
        }
        assert!(fs.paths().is_empty());
        assert!(fs.write(Path::new("/workspace/inside.md"), "ok").is_ok());
        assert_eq!(fs.file("inside.md").as_deref(), Some("ok"));
    }

    #[test]
    fn paths_are_relative() {
        let fs = MemoryFileSystem::with_files(&[(".ai/task/plan.md", "")]);
        assert_eq!(fs.paths(), vec![".ai/task/plan.md"]);
    }
}
