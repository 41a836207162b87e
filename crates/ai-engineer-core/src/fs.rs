use crate::error::{EngineError, Result};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

// ---------------------------------------------------------------------------
// FileSystem port
// ---------------------------------------------------------------------------

/// Everything the engine, its rules and the archiver are allowed to do to
/// the workspace. Relative paths are resolved against [`FileSystem::base_dir`].
pub trait FileSystem {
    fn base_dir(&self) -> &Path;

    fn exists(&self, path: &Path) -> Result<bool>;

    /// Fails with [`EngineError::NotFound`] when the file is absent.
    fn read(&self, path: &Path) -> Result<String>;

    /// Creates parent directories as needed.
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// No-op when the file is absent.
    fn delete(&self, path: &Path) -> Result<()>;

    /// Idempotent, creates parents.
    fn create_dir(&self, path: &Path) -> Result<()>;

    /// File names (not directories) directly inside `dir`, sorted.
    /// Empty when `dir` does not exist.
    fn list_files(&self, dir: &Path) -> Result<Vec<String>>;

    fn read_safe(&self, path: &Path, fallback: &str) -> String {
        self.read(path).unwrap_or_else(|_| fallback.to_string())
    }

    fn resolve_path(&self, segments: &[&str]) -> PathBuf {
        let mut path = self.base_dir().to_path_buf();
        for segment in segments {
            path.push(segment);
        }
        normalize(&path)
    }

    fn is_within_base(&self, path: &Path) -> bool {
        absolute(self.base_dir(), path).starts_with(normalize(self.base_dir()))
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        let full = absolute(self.base_dir(), path);
        match full.strip_prefix(normalize(self.base_dir())) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => full,
        }
    }
}

/// Write `content` only if nothing exists at `path`. Returns true if written.
pub fn write_if_missing(fs: &dyn FileSystem, path: &Path, content: &str) -> Result<bool> {
    if fs.exists(path)? {
        return Ok(false);
    }
    fs.write(path, content)?;
    Ok(true)
}

/// Resolve `.` and `..` lexically; the files involved may not exist yet.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn absolute(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

// ---------------------------------------------------------------------------
// DiskFileSystem
// ---------------------------------------------------------------------------

/// The real workspace on disk. Paths outside `base` are refused.
#[derive(Debug, Clone)]
pub struct DiskFileSystem {
    base: PathBuf,
}

impl DiskFileSystem {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let base = std::path::absolute(&base).unwrap_or(base);
        Self {
            base: normalize(&base),
        }
    }

    fn full(&self, path: &Path) -> Result<PathBuf> {
        if !self.is_within_base(path) {
            return Err(EngineError::OutsideWorkspace(path.to_path_buf()));
        }
        Ok(absolute(&self.base, path))
    }
}

impl FileSystem for DiskFileSystem {
    fn base_dir(&self) -> &Path {
        &self.base
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let full = self.full(path)?;
        full.try_exists()
            .map_err(|e| EngineError::io("check", full, e))
    }

    fn read(&self, path: &Path) -> Result<String> {
        let full = self.full(path)?;
        std::fs::read_to_string(&full).map_err(|e| match e.kind() {
            ErrorKind::NotFound => EngineError::NotFound(path.to_path_buf()),
            _ => EngineError::io("read", full, e),
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let full = self.full(path)?;
        atomic_write(&full, content.as_bytes())
    }

    fn delete(&self, path: &Path) -> Result<()> {
        let full = self.full(path)?;
        match std::fs::remove_file(&full) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EngineError::io("delete", full, e)),
        }
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        let full = self.full(path)?;
        std::fs::create_dir_all(&full).map_err(|e| EngineError::io("create", full, e))
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let full = self.full(dir)?;
        let entries = match std::fs::read_dir(&full) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(EngineError::io("list", full, e)),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| EngineError::io("list", &full, e))?;
            let is_file = entry
                .file_type()
                .map_err(|e| EngineError::io("list", entry.path(), e))?
                .is_file();
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Write through a tempfile in the target directory so readers never see a
/// half-written file.
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| EngineError::io("create", dir, e))?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| EngineError::io("write", path, e))?;
    tmp.write_all(data)
        .map_err(|e| EngineError::io("write", path, e))?;
    tmp.persist(path)
        .map_err(|e| EngineError::io("write", path, e.error))?;
    Ok(())
}
