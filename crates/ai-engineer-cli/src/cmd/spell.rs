use crate::output::{print_json, print_message};
use ai_engineer_core::render::{ai_section, developer_section};
use ai_engineer_core::{
    default_table, DiskFileSystem, Engine, JsonStateRepository, Spell, SpellResult,
};
use anyhow::Context;
use serde::Serialize;
use std::path::Path;

/// JSON form of a cast: the result plus the message split by audience.
#[derive(Serialize)]
struct SpellOutput<'a> {
    #[serde(flatten)]
    result: &'a SpellResult,
    developer: Option<&'a str>,
    ai: Option<&'a str>,
}

impl<'a> SpellOutput<'a> {
    fn new(result: &'a SpellResult) -> Self {
        Self {
            result,
            developer: developer_section(&result.message),
            ai: ai_section(&result.message),
        }
    }
}

/// Cast `spell` in the workspace at `root`. A spell that does not apply is
/// still printed, then reported as an error so the exit status is non-zero.
pub fn run(root: &Path, spell: Spell, json: bool) -> anyhow::Result<()> {
    let fs = DiskFileSystem::new(root);
    let repo = JsonStateRepository::new(&fs);
    let table = default_table().context("rule table failed validation")?;

    let result = Engine::new(&repo, &fs, &table)
        .resolve(spell)
        .with_context(|| format!("failed to cast {spell}"))?;

    if json {
        print_json(&SpellOutput::new(&result))?;
    } else {
        print_message(&result.message);
    }

    if !result.success {
        anyhow::bail!("{spell} was not applied");
    }
    Ok(())
}
