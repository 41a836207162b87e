use super::{exists, task_results_exist, task_results_missing};
use crate::error::Result;
use crate::fs::FileSystem;
use crate::paths;
use crate::plan;
use crate::render::Replacements;
use crate::responses as r;
use crate::rule::{rule, Rule, STAY};
use crate::state::StateContext;
use crate::types::{Spell, State};
use std::path::Path;

const REVIEW_FROM_PLAN: [State; 5] = [
    State::PrGatheringCommentsG,
    State::PrReviewTaskDraftG,
    State::PrConfirmRestartCommentsG,
    State::PrConfirmRestartTaskG,
    State::ErrorCommentsMissingG,
];

const REVIEW_FROM_TASK: [State; 5] = [
    State::PrGatheringCommentsA,
    State::PrReviewTaskDraftA,
    State::PrConfirmRestartCommentsA,
    State::PrConfirmRestartTaskA,
    State::ErrorCommentsMissingA,
];

/// Workflow files listed in status output.
const TRACKED_FILES: [&str; 7] = [
    paths::CONTEXT,
    paths::PLAN,
    paths::TASK,
    paths::TASK_RESULTS,
    paths::COMMENTS,
    paths::REVIEW_TASK,
    paths::REVIEW_TASK_RESULTS,
];

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

fn task_without_results(ctx: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(exists(fs, paths::TASK)? && task_results_missing(ctx, fs)?)
}

fn task_with_results(ctx: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(exists(fs, paths::TASK)? && task_results_exist(ctx, fs)?)
}

/// What enrichment would find in a source file.
enum Refs {
    Absent,
    None,
    AllProcessed,
    New(Vec<String>),
}

fn refs_in(fs: &dyn FileSystem, source: &'static str) -> Result<Refs> {
    if !exists(fs, source)? {
        return Ok(Refs::Absent);
    }
    if plan::urls_in(fs, Path::new(source))?.is_empty() {
        return Ok(Refs::None);
    }
    let fresh = plan::unprocessed_urls(fs, Path::new(source))?;
    Ok(if fresh.is_empty() {
        Refs::AllProcessed
    } else {
        Refs::New(fresh)
    })
}

fn context_has_new_refs(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(matches!(refs_in(fs, paths::CONTEXT)?, Refs::New(_)))
}

fn context_has_no_refs(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(matches!(refs_in(fs, paths::CONTEXT)?, Refs::None))
}

fn context_refs_processed(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(matches!(refs_in(fs, paths::CONTEXT)?, Refs::AllProcessed))
}

fn plan_has_new_refs(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(matches!(refs_in(fs, paths::PLAN)?, Refs::New(_)))
}

fn plan_has_no_refs(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(matches!(refs_in(fs, paths::PLAN)?, Refs::None))
}

fn plan_refs_processed(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(matches!(refs_in(fs, paths::PLAN)?, Refs::AllProcessed))
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

fn report_status(ctx: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    let mut files = Vec::new();
    for path in TRACKED_FILES {
        let mark = if exists(fs, path)? { "x" } else { " " };
        files.push(format!("- [{mark}] {}", paths::file_name(path)));
    }
    Ok(Replacements::from([
        ("CURRENT_STATE", ctx.current_state.to_string()),
        ("STATE_DESCRIPTION", ctx.current_state.description().to_string()),
        ("WORKSPACE_FILES", files.join("\n")),
    ]))
}

fn enrich(fs: &dyn FileSystem, source: &'static str) -> Result<Replacements> {
    let fresh = plan::unprocessed_urls(fs, Path::new(source))?;
    plan::record_processed(fs, &fresh)?;
    tracing::info!(source, count = fresh.len(), "recorded atlassian references");
    Ok(Replacements::from([
        ("ATLASSIAN_URLS", plan::bullet_list(&fresh)),
        ("SOURCE_FILE", source.to_string()),
    ]))
}

fn enrich_from_context(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    enrich(fs, paths::CONTEXT)
}

fn enrich_from_plan(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    enrich(fs, paths::PLAN)
}

fn name_context(_: &StateContext, _: &dyn FileSystem) -> Result<Replacements> {
    Ok(Replacements::from([("SOURCE_FILE", paths::CONTEXT.to_string())]))
}

fn name_plan(_: &StateContext, _: &dyn FileSystem) -> Result<Replacements> {
    Ok(Replacements::from([("SOURCE_FILE", paths::PLAN.to_string())]))
}

// ---------------------------------------------------------------------------
// Universal spells
// ---------------------------------------------------------------------------

pub fn rules() -> Vec<Rule> {
    let mut rules = finite_and_reverto();
    rules.push(rule! {
        id: "lumos_status",
        from: State::all(),
        spell: Spell::Lumos,
        to: STAY,
        response: r::STATUS,
        execute: report_status,
        supplies: &["CURRENT_STATE", "STATE_DESCRIPTION", "WORKSPACE_FILES"],
    });
    rules.extend(expecto());
    rules
}

fn finite_and_reverto() -> Vec<Rule> {
    vec![
        rule! {
            id: "finite_return_to_plan",
            from: [
                State::GatherEditing,
                State::AchieveTaskDrafting,
                State::AchieveComplete,
                State::ErrorCommentsMissingG,
                State::ErrorCommentsMissingA,
            ],
            spell: Spell::Finite,
            to: State::GatherEditing,
            response: r::RETURN_TO_PLAN,
        },
        rule! {
            id: "reverto_to_plan",
            from: REVIEW_FROM_PLAN,
            spell: Spell::Reverto,
            to: State::GatherEditing,
            response: r::REVIEW_EXITED_TO_PLAN,
        },
        rule! {
            id: "reverto_to_drafting",
            from: REVIEW_FROM_TASK,
            spell: Spell::Reverto,
            to: State::AchieveTaskDrafting,
            response: r::REVIEW_EXITED_TO_DRAFTING,
            when: task_without_results,
        },
        rule! {
            id: "reverto_to_executed",
            from: REVIEW_FROM_TASK,
            spell: Spell::Reverto,
            to: State::AchieveTaskExecuted,
            response: r::REVIEW_EXITED_TO_EXECUTED,
            when: task_with_results,
        },
    ]
}

fn expecto() -> Vec<Rule> {
    vec![
        rule! {
            id: "expecto_context_new",
            from: [State::GatherEditingContext],
            spell: Spell::Expecto,
            to: STAY,
            response: r::EXPECTO_NEW_REFS,
            when: context_has_new_refs,
            execute: enrich_from_context,
            supplies: &["ATLASSIAN_URLS", "SOURCE_FILE"],
        },
        rule! {
            id: "expecto_context_none",
            from: [State::GatherEditingContext],
            spell: Spell::Expecto,
            to: STAY,
            response: r::EXPECTO_NO_REFS,
            when: context_has_no_refs,
            execute: name_context,
            supplies: &["SOURCE_FILE"],
        },
        rule! {
            id: "expecto_context_processed",
            from: [State::GatherEditingContext],
            spell: Spell::Expecto,
            to: STAY,
            response: r::EXPECTO_ALL_PROCESSED,
            when: context_refs_processed,
            execute: name_context,
            supplies: &["SOURCE_FILE"],
        },
        rule! {
            id: "expecto_plan_new",
            from: [State::GatherEditing],
            spell: Spell::Expecto,
            to: STAY,
            response: r::EXPECTO_NEW_REFS,
            when: plan_has_new_refs,
            execute: enrich_from_plan,
            supplies: &["ATLASSIAN_URLS", "SOURCE_FILE"],
        },
        rule! {
            id: "expecto_plan_none",
            from: [State::GatherEditing],
            spell: Spell::Expecto,
            to: STAY,
            response: r::EXPECTO_NO_REFS,
            when: plan_has_no_refs,
            execute: name_plan,
            supplies: &["SOURCE_FILE"],
        },
        rule! {
            id: "expecto_plan_processed",
            from: [State::GatherEditing],
            spell: Spell::Expecto,
            to: STAY,
            response: r::EXPECTO_ALL_PROCESSED,
            when: plan_refs_processed,
            execute: name_plan,
            supplies: &["SOURCE_FILE"],
        },
    ]
}
