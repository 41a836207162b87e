use crate::output::print_json;
use ai_engineer_core::{
    paths, DiskFileSystem, FileSystem, JsonStateRepository, State, StateRepository,
};
use anyhow::Context;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct InitOutput {
    root: String,
    state: State,
    created: bool,
}

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let fs = DiskFileSystem::new(root);
    fs.create_dir(paths::rel(paths::TASK_DIR))
        .with_context(|| format!("failed to create {}", paths::TASK_DIR))?;

    let repo = JsonStateRepository::new(&fs);
    let (ctx, created) = match repo.load().context("failed to load state")? {
        Some(ctx) => (ctx, false),
        None => (
            repo.initialize(State::START)
                .context("failed to write state file")?,
            true,
        ),
    };

    if json {
        return print_json(&InitOutput {
            root: root.display().to_string(),
            state: ctx.current_state,
            created,
        });
    }

    println!("Initializing ai-engineer in: {}", root.display());
    if created {
        println!("  created: {}", paths::STATE_FILE);
    } else {
        println!("  exists:  {} ({})", paths::STATE_FILE, ctx.current_state);
    }
    println!("\nNext: ai-engineer accio");
    Ok(())
}
