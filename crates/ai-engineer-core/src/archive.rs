use crate::error::Result;
use crate::fs::FileSystem;
use crate::paths;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Seed used when a task document names no task.
pub const UNKNOWN_TASK: &str = "unknown-task";

/// What an archive call actually did. Per-file failures land in `failed`
/// instead of aborting the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveReport {
    pub dir: PathBuf,
    pub moved: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl ArchiveReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn dir_display(&self) -> String {
        self.dir.to_string_lossy().into_owned()
    }
}

/// One file to archive: its workspace path and its name inside the archive.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveEntry {
    pub source: &'static str,
    pub name: &'static str,
}

impl ArchiveEntry {
    pub const fn new(source: &'static str, name: &'static str) -> Self {
        Self { source, name }
    }
}

pub const TASK_FILES: &[ArchiveEntry] = &[
    ArchiveEntry::new(paths::TASK, "task.md"),
    ArchiveEntry::new(paths::TASK_RESULTS, "task-results.md"),
];

pub const REVIEW_FILES: &[ArchiveEntry] = &[
    ArchiveEntry::new(paths::COMMENTS, "comments.md"),
    ArchiveEntry::new(paths::REVIEW_TASK, "review-task.md"),
    ArchiveEntry::new(paths::REVIEW_TASK_RESULTS, "review-task-results.md"),
];

// ---------------------------------------------------------------------------
// Core move
// ---------------------------------------------------------------------------

/// Create `target_dir` and move each present entry into it. Absent sources
/// are skipped. Failures on one file are logged and recorded, then the rest
/// continue. Only failing to create the directory is an error.
pub fn archive(
    fs: &dyn FileSystem,
    entries: &[ArchiveEntry],
    target_dir: &Path,
) -> Result<ArchiveReport> {
    fs.create_dir(target_dir)?;
    let mut report = ArchiveReport {
        dir: target_dir.to_path_buf(),
        ..ArchiveReport::default()
    };

    for entry in entries {
        match move_file(fs, Path::new(entry.source), &target_dir.join(entry.name)) {
            Ok(true) => report.moved.push(entry.name.to_string()),
            Ok(false) => report.skipped.push(entry.source.to_string()),
            Err(e) => {
                tracing::warn!(source = entry.source, error = %e, "could not archive file");
                report.failed.push((entry.source.to_string(), e.to_string()));
            }
        }
    }

    tracing::info!(
        dir = %target_dir.display(),
        moved = report.moved.len(),
        failed = report.failed.len(),
        "archived"
    );
    Ok(report)
}

fn move_file(fs: &dyn FileSystem, source: &Path, dest: &Path) -> Result<bool> {
    if !fs.exists(source)? {
        return Ok(false);
    }
    let content = fs.read(source)?;
    fs.write(dest, &content)?;
    fs.delete(source)?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// `<kind>[-<seed>]-<YYYY-MM-DD>-<HHMMSS>`. Two calls in the same second with
/// the same seed produce the same name.
pub fn archive_dir_name(kind: &str, seed: Option<&str>, at: DateTime<Utc>) -> String {
    let stamp = at.format("%Y-%m-%d-%H%M%S");
    match seed.and_then(paths::slugify) {
        Some(slug) => format!("{kind}-{slug}-{stamp}"),
        None => format!("{kind}-{stamp}"),
    }
}

static TASK_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn task_name_re() -> &'static Regex {
    TASK_NAME_RE.get_or_init(|| Regex::new(r"(?s)\A---\r?\n.*?task_name: '(.+?)'.*?\n---").unwrap())
}

/// `task_name: '...'` from the leading front-matter block of a task document.
pub fn task_name(content: &str) -> Option<String> {
    task_name_re()
        .captures(content)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
}

// ---------------------------------------------------------------------------
// Workflow archives
// ---------------------------------------------------------------------------

/// Move `task.md` and `task-results.md` to `tasks/task-<name>-<stamp>/`.
pub fn archive_task(fs: &dyn FileSystem, at: DateTime<Utc>) -> Result<ArchiveReport> {
    let content = fs.read_safe(paths::rel(paths::TASK), "");
    let name = task_name(&content)
        .and_then(|n| paths::slugify(&n))
        .unwrap_or_else(|| UNKNOWN_TASK.to_string());
    let dir = Path::new(paths::TASK_ARCHIVE_DIR).join(archive_dir_name("task", Some(&name), at));
    archive(fs, TASK_FILES, &dir)
}

/// Move the review files to `pr-reviews/pr-review-<stamp>/`.
pub fn archive_review(fs: &dyn FileSystem, at: DateTime<Utc>) -> Result<ArchiveReport> {
    let dir = Path::new(paths::REVIEW_ARCHIVE_DIR).join(archive_dir_name("pr-review", None, at));
    archive(fs, REVIEW_FILES, &dir)
}
