use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Workspace-relative paths
// ---------------------------------------------------------------------------

pub const AI_DIR: &str = ".ai";
pub const TASK_DIR: &str = ".ai/task";

pub const STATE_FILE: &str = ".ai/task/state.json";

pub const PLAN: &str = ".ai/task/plan.md";
pub const TASK: &str = ".ai/task/task.md";
pub const TASK_RESULTS: &str = ".ai/task/task-results.md";
pub const CONTEXT: &str = ".ai/task/context.md";
pub const COMMENTS: &str = ".ai/task/comments.md";
pub const REVIEW_TASK: &str = ".ai/task/review-task.md";
pub const REVIEW_TASK_RESULTS: &str = ".ai/task/review-task-results.md";

pub const PLAN_GUIDE: &str = ".ai/plan-guide.md";
pub const TASK_GUIDE: &str = ".ai/task-guide.md";

/// Newline-separated Atlassian URLs that enrichment has already reported.
pub const ATLASSIAN_REFS: &str = ".ai/task/.atlassian-refs";

pub const TASK_ARCHIVE_DIR: &str = ".ai/task/tasks";
pub const REVIEW_ARCHIVE_DIR: &str = ".ai/task/pr-reviews";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn rel(path: &'static str) -> &'static Path {
    Path::new(path)
}

pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

/// File name of a workspace path, used as the archived copy's name.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

static NON_SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn non_slug_re() -> &'static Regex {
    NON_SLUG_RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap())
}

/// Lowercase `seed` and collapse every run of other characters into one hyphen.
/// Returns `None` when nothing filesystem-safe is left.
pub fn slugify(seed: &str) -> Option<String> {
    let lower = seed.to_lowercase();
    let slug = non_slug_re().replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        None
    } else {
        Some(slug.chars().take(64).collect::<String>().trim_end_matches('-').to_string())
    }
}
