use super::{create, exists};
use crate::error::Result;
use crate::fs::FileSystem;
use crate::paths;
use crate::plan;
use crate::render::Replacements;
use crate::responses as r;
use crate::rule::{rule, Rule, STAY};
use crate::state::StateContext;
use crate::templates;
use crate::types::{Spell, State};

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

fn context_urls(fs: &dyn FileSystem) -> Result<Vec<String>> {
    plan::urls_in(fs, paths::rel(paths::CONTEXT))
}

fn context_with_refs(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(exists(fs, paths::CONTEXT)? && !context_urls(fs)?.is_empty())
}

fn context_without_refs(_: &StateContext, fs: &dyn FileSystem) -> Result<bool> {
    Ok(exists(fs, paths::CONTEXT)? && context_urls(fs)?.is_empty())
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

fn start_context(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    create(fs, paths::CONTEXT, templates::CONTEXT)?;
    create(fs, paths::PLAN_GUIDE, templates::PLAN_GUIDE)?;
    create(fs, paths::TASK_GUIDE, templates::TASK_GUIDE)?;
    Ok(Replacements::new())
}

fn start_plan(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    create(fs, paths::PLAN, templates::PLAN)?;
    Ok(Replacements::new())
}

fn start_plan_listing_refs(_: &StateContext, fs: &dyn FileSystem) -> Result<Replacements> {
    let urls = context_urls(fs)?;
    create(fs, paths::PLAN, templates::PLAN)?;
    Ok(Replacements::from([("ATLASSIAN_URLS", plan::bullet_list(&urls))]))
}

// ---------------------------------------------------------------------------
// Context gathering
// ---------------------------------------------------------------------------

pub fn rules() -> Vec<Rule> {
    vec![
        rule! {
            id: "gather_start_context",
            from: [State::GatherNeedsContext],
            spell: Spell::Accio,
            to: State::GatherEditingContext,
            response: r::CONTEXT_CREATED,
            execute: start_context,
        },
        rule! {
            id: "gather_plan_with_refs",
            from: [State::GatherEditingContext],
            spell: Spell::Accio,
            to: State::GatherEditing,
            response: r::PLAN_CREATED_WITH_REFS,
            when: context_with_refs,
            execute: start_plan_listing_refs,
            supplies: &["ATLASSIAN_URLS"],
        },
        rule! {
            id: "gather_plan",
            from: [State::GatherEditingContext],
            spell: Spell::Accio,
            to: State::GatherEditing,
            response: r::PLAN_CREATED,
            when: context_without_refs,
            execute: start_plan,
        },
        rule! {
            id: "gather_context_missing",
            from: [State::GatherEditingContext],
            spell: Spell::Accio,
            to: State::ErrorContextMissing,
            response: r::CONTEXT_MISSING,
            when: |_, fs| Ok(!exists(fs, paths::CONTEXT)?),
        },
        // Blocked
        rule! {
            id: "gather_reverto_blocked",
            from: [State::GatherNeedsContext, State::GatherEditingContext],
            spell: Spell::Reverto,
            to: STAY,
            response: r::REVERTO_NOT_IN_REVIEW,
        },
        rule! {
            id: "gather_expecto_blocked",
            from: [State::GatherNeedsContext],
            spell: Spell::Expecto,
            to: STAY,
            response: r::EXPECTO_NEEDS_CONTEXT,
        },
        rule! {
            id: "gather_reparo_blocked",
            from: [State::GatherNeedsContext, State::GatherEditingContext],
            spell: Spell::Reparo,
            to: STAY,
            response: r::REPARO_NEEDS_PLAN,
        },
        // No-op
        rule! {
            id: "gather_finite_noop",
            from: [State::GatherNeedsContext, State::GatherEditingContext],
            spell: Spell::Finite,
            to: STAY,
            response: r::FINITE_ALREADY_GATHERING,
        },
    ]
}
