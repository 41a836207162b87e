use crate::output::print_json;
use ai_engineer_core::{paths, DiskFileSystem, FileSystem, JsonStateRepository, StateRepository};
use anyhow::Context;
use std::path::Path;

/// Drop the state file, even an unreadable one. Workflow documents are left
/// alone.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let fs = DiskFileSystem::new(root);
    let repo = JsonStateRepository::new(&fs);
    let had_state = fs
        .exists(repo.path())
        .context("failed to check state file")?;
    repo.clear().context("failed to remove state file")?;

    if json {
        return print_json(&serde_json::json!({ "cleared": had_state }));
    }
    if had_state {
        println!("Removed {}", paths::STATE_FILE);
    } else {
        println!("No state to reset");
    }
    Ok(())
}
