use crate::error::Result;
use crate::fs::FileSystem;
use crate::paths;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Acceptance criteria
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptanceCriteria {
    pub completed: usize,
    pub pending: usize,
}

impl AcceptanceCriteria {
    pub fn parse(content: &str) -> Self {
        let mut criteria = Self::default();
        for line in content.lines().map(str::trim) {
            if line.starts_with("- [x]") || line.starts_with("- [X]") {
                criteria.completed += 1;
            } else if line.starts_with("- [ ]") {
                criteria.pending += 1;
            }
        }
        criteria
    }

    pub fn total(&self) -> usize {
        self.completed + self.pending
    }

    pub fn has_pending(&self) -> bool {
        self.pending > 0
    }

    /// At least one criterion and none left open.
    pub fn all_complete(&self) -> bool {
        self.pending == 0 && self.completed > 0
    }
}

/// Criteria of the plan file. An absent plan has none.
pub fn plan_criteria(fs: &dyn FileSystem) -> Result<AcceptanceCriteria> {
    let plan = paths::rel(paths::PLAN);
    if !fs.exists(plan)? {
        return Ok(AcceptanceCriteria::default());
    }
    Ok(AcceptanceCriteria::parse(&fs.read(plan)?))
}

// ---------------------------------------------------------------------------
// Atlassian references
// ---------------------------------------------------------------------------

static ATLASSIAN_RE: OnceLock<Regex> = OnceLock::new();

fn atlassian_re() -> &'static Regex {
    ATLASSIAN_RE.get_or_init(|| Regex::new(r"(?i)https?://[^\s]*\.atlassian\.net/[^\s]*").unwrap())
}

/// Atlassian URLs in `content`, de-duplicated in first-seen order.
pub fn atlassian_urls(content: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for m in atlassian_re().find_iter(content) {
        if !urls.iter().any(|u| u == m.as_str()) {
            urls.push(m.as_str().to_string());
        }
    }
    urls
}

/// Atlassian URLs in the file at `source`; empty when the file is absent.
pub fn urls_in(fs: &dyn FileSystem, source: &Path) -> Result<Vec<String>> {
    if !fs.exists(source)? {
        return Ok(Vec::new());
    }
    Ok(atlassian_urls(&fs.read(source)?))
}

/// URLs already recorded in the ledger.
pub fn processed_urls(fs: &dyn FileSystem) -> Result<Vec<String>> {
    let ledger = paths::rel(paths::ATLASSIAN_REFS);
    if !fs.exists(ledger)? {
        return Ok(Vec::new());
    }
    Ok(fs
        .read(ledger)?
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// URLs in `source` that the ledger has not seen yet.
pub fn unprocessed_urls(fs: &dyn FileSystem, source: &Path) -> Result<Vec<String>> {
    let seen = processed_urls(fs)?;
    Ok(urls_in(fs, source)?
        .into_iter()
        .filter(|u| !seen.contains(u))
        .collect())
}

/// Append `urls` to the ledger, skipping ones already present.
pub fn record_processed(fs: &dyn FileSystem, urls: &[String]) -> Result<()> {
    let mut all = processed_urls(fs)?;
    for url in urls {
        if !all.contains(url) {
            all.push(url.clone());
        }
    }
    let mut body = all.join("\n");
    body.push('\n');
    fs.write(paths::rel(paths::ATLASSIAN_REFS), &body)
}

/// Markdown bullet list, one URL per line.
pub fn bullet_list(urls: &[String]) -> String {
    urls.iter()
        .map(|u| format!("- {u}"))
        .collect::<Vec<_>>()
        .join("\n")
}
