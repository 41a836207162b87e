use crate::output::{print_json, print_message};
use ai_engineer_core::{default_table, DiskFileSystem, Engine, JsonStateRepository};
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let fs = DiskFileSystem::new(root);
    let repo = JsonStateRepository::new(&fs);
    let table = default_table().context("rule table failed validation")?;

    let status = Engine::new(&repo, &fs, &table)
        .status()
        .context("failed to load state")?;

    if json {
        return print_json(&status);
    }

    let spells: Vec<String> = status
        .available_spells
        .iter()
        .map(|s| s.to_string())
        .collect();
    print_message(&format!(
        "State:  {}\n        {}\nSpells: {}",
        status.state,
        status.description,
        spells.join(", ")
    ));
    if !status.initialized {
        println!("\nNo state recorded yet. Run: ai-engineer init");
    }
    Ok(())
}
