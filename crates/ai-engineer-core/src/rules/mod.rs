//! The workflow's rule table, one module per phase. Phases are concatenated
//! in a fixed order and earlier rules take precedence.

mod achieve;
mod gather;
mod recovery;
mod review;
mod universal;

use crate::archive::{self, ArchiveReport};
use crate::error::Result;
use crate::fs::{write_if_missing, FileSystem};
use crate::paths;
use crate::render::Replacements;
use crate::rule::{Rule, RuleTable};
use crate::state::StateContext;
use crate::templates;
use chrono::Utc;

/// Every phase table in precedence order.
pub fn default_rules() -> Vec<Rule> {
    phases().into_iter().flatten().collect()
}

/// The linted table the engine runs against.
pub fn default_table() -> Result<RuleTable> {
    RuleTable::compose(phases())
}

fn phases() -> Vec<Vec<Rule>> {
    vec![
        gather::rules(),
        achieve::rules(),
        review::rules(),
        recovery::rules(),
        universal::rules(),
    ]
}

// ---------------------------------------------------------------------------
// Condition helpers
// ---------------------------------------------------------------------------

fn exists(fs: &dyn FileSystem, path: &'static str) -> Result<bool> {
    fs.exists(paths::rel(path))
}

fn comments_exist(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    exists(fs, paths::COMMENTS)
}

fn comments_missing(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(!exists(fs, paths::COMMENTS)?)
}

fn review_task_exists(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    exists(fs, paths::REVIEW_TASK)
}

fn review_task_missing(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(!exists(fs, paths::REVIEW_TASK)?)
}

fn task_results_exist(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    exists(fs, paths::TASK_RESULTS)
}

fn task_results_missing(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(!exists(fs, paths::TASK_RESULTS)?)
}

// ---------------------------------------------------------------------------
// Action helpers
// ---------------------------------------------------------------------------

fn create(fs: &dyn FileSystem, path: &'static str, body: &str) -> Result<()> {
    write_if_missing(fs, paths::rel(path), body)?;
    Ok(())
}

fn create_task(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    create(fs, paths::TASK, templates::TASK)?;
    Ok(Replacements::new())
}

fn create_comments(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    create(fs, paths::COMMENTS, templates::COMMENTS)?;
    Ok(Replacements::new())
}

fn create_review_task(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    create(fs, paths::REVIEW_TASK, templates::REVIEW_TASK)?;
    Ok(Replacements::new())
}

fn archive_task(fs: &dyn FileSystem) -> Result<ArchiveReport> {
    archive::archive_task(fs, Utc::now())
}

fn archive_review(fs: &dyn FileSystem) -> Result<ArchiveReport> {
    archive::archive_review(fs, Utc::now())
}

/// Read the task results, archive the task, then start a fresh one.
fn archive_task_and_start_next(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    let results = fs.read(paths::rel(paths::TASK_RESULTS))?;
    let report = archive_task(fs)?;
    create(fs, paths::TASK, templates::TASK)?;
    Ok(Replacements::from([
        ("TASK_RESULTS", results),
        ("ARCHIVE_DIR", report.dir_display()),
    ]))
}

#[cfg(test)]
mod tests;
