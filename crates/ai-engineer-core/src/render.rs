use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Values substituted into a response or file template, keyed by placeholder name.
pub type Replacements = BTreeMap<&'static str, String>;

pub const DEVELOPER_HEADING: &str = "## Response to the Developer";
pub const AI_HEADING: &str = "## Response to the AI";

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
static BRACKETED_RE: OnceLock<Regex> = OnceLock::new();

/// `[NAME]` with an upper-case name of two or more characters. Checklist
/// boxes (`[x]`, `[ ]`) and the `[G/A]` marker never match.
fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\[([A-Z][A-Z0-9_]+)\]").unwrap())
}

/// Any single-line bracketed name, whatever its case.
fn bracketed_re() -> &'static Regex {
    BRACKETED_RE.get_or_init(|| Regex::new(r"\[([^\[\]\n]+)\]").unwrap())
}

/// Substitute every `[NAME]` whose name has a replacement. Unknown names are
/// left intact and substituted values are not scanned again.
pub fn render(body: &str, replacements: &BTreeMap<&str, String>) -> String {
    bracketed_re()
        .replace_all(body, |caps: &Captures| match replacements.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Distinct placeholder names in first-seen order.
pub fn placeholders(body: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in placeholder_re().captures_iter(body) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

pub fn has_placeholders(body: &str) -> bool {
    placeholder_re().is_match(body)
}

/// Placeholders declared by `body` that `supplied` does not cover.
pub fn missing_placeholders(body: &str, supplied: &[&str]) -> Vec<String> {
    placeholders(body)
        .into_iter()
        .filter(|name| !supplied.contains(&name.as_str()))
        .collect()
}

/// The text under the developer heading, up to the AI heading.
pub fn developer_section(message: &str) -> Option<&str> {
    section(message, DEVELOPER_HEADING, AI_HEADING)
}

/// The text under the AI heading, up to the developer heading.
pub fn ai_section(message: &str) -> Option<&str> {
    section(message, AI_HEADING, DEVELOPER_HEADING)
}

fn section<'a>(message: &'a str, heading: &str, other: &str) -> Option<&'a str> {
    let start = message.find(heading)? + heading.len();
    let rest = &message[start..];
    let end = rest.find(other).unwrap_or(rest.len());
    Some(rest[..end].trim())
}
